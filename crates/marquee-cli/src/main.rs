#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! `marquee` binary entrypoint.

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = marquee_cli::run().await;
    std::process::exit(exit_code);
}
