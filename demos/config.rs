//! # Example: config
//!
//! Reads the built-in settings from the command line, then adds application
//! settings and groups them under a tag.
//!
//! ## Flow
//! ```text
//! defaults ──► --debug / --log-level / --sess-name ──► ConfigStore::global()
//!   set("db_host"), set("db_port")
//!   set_tag("db", [db_host, db_port]) ──► get_tag("db")
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example config -- --debug --sess-name demo
//! ```

use ph_toolbox::{config, keys, slugify, ConfigStore};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = ConfigStore::global();

    // 1. Built-in settings
    println!("debug     = {}", cfg.is_debug());
    println!("log_level = {}", cfg.log_level()?);
    println!("sess_name = {:?}", config(keys::SESS_NAME));
    println!("dir_base  = {:?}", config(keys::DIR_BASE));

    // 2. Application settings
    cfg.set("db_host", "localhost");
    cfg.set("db_port", "5432");
    let port: u16 = cfg.get_required_as("db_port")?;
    println!("db_port   = {port}");

    // 3. Tags
    cfg.set_tag("db", ["db_host", "db_port"])?;
    for (key, value) in cfg.get_tag("db")? {
        println!("[db] {key} = {value}");
    }

    // 4. Slugs
    println!("slug      = {}", slugify("Nightly Build #42!"));
    Ok(())
}
