//! Command-line interface for the `primehomes` application.
//!
//! This crate's binary is a thin entry point; the commands live in the
//! library half so integration tests can reach them.

fn main() -> anyhow::Result<()> {
    primehomes::run()
}
