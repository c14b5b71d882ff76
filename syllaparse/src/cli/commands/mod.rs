// Module for command implementations

pub mod parse;
