use std::io::Write;

use s3purge::config::PurgeConfig;
use s3purge::error::{PurgeError, PurgeResult};
use s3purge::purge::{BucketPurger, PurgeSummary};
use s3purge::storage::s3::S3Store;

/// Delete every object in the bucket named by `S3_BUCKET`.
///
/// Credentials, region and endpoint come from `S3_ACCESS_KEY_ID`,
/// `S3_SECRET_ACCESS_KEY`, `S3_REGION` and `S3_ENDPOINT`. Debug builds also
/// read a `.env` file from the working directory.
///
/// ```text
/// export RUST_LOG=error,s3purge=info
/// cargo run --release --bin purge
/// ```
///
/// A failure is always written to stderr, whatever `RUST_LOG` says, and the
/// process exits with status 1.
fn main() {
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    env_logger::init();

    if let Err(e) = run() {
        report_failure(&e, &mut std::io::stderr());
        std::process::exit(1);
    }
}

fn run() -> PurgeResult<PurgeSummary> {
    let config = PurgeConfig::from_env();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async {
        let store = S3Store::new(&config).await;
        BucketPurger::new(store, config.bucket_label())
            .purge_bucket()
            .await
    })
}

fn report_failure<W: Write>(e: &PurgeError, err_out: &mut W) {
    log::debug!("Purge failed: {:?}", e);
    // Nothing more can be done if stderr itself is gone.
    let _ = writeln!(err_out, "Error purging bucket: {}", e);
}
