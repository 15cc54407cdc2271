// Library root
// -----------
// The binary (`main.rs`) parses arguments with `cli`, loads credentials
// with `config` and hands the chosen subcommand to `commands`.
//
// Module responsibilities:
// - `config`: API key and endpoint from the environment and dotenv files.
// - `api`: builds and sends requests to the diagram endpoints.
// - `model`: typed diagram records.
// - `filter`: dotted field-path lookups over untyped JSON.
// - `commands`: one function per subcommand; request, decode, print.
// - `error`: exit codes.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
