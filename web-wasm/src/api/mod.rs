pub mod cp_parse;
