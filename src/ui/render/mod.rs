mod all;
mod footer;
mod item_form;
mod items;
mod log;
mod main;
mod menu;
mod status;
mod variant_row;

use self::log::log;
use super::*;
use footer::footer;
use main::main;
use status::status;

pub use all::all as render;
