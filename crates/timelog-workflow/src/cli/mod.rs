/*
[INPUT]:  Parsed CLI subcommands and loaded configuration
[OUTPUT]: Non-interactive command handlers
[POS]:    CLI layer module root
[UPDATE]: When adding subcommands
*/

pub mod inspect;
pub mod run;
