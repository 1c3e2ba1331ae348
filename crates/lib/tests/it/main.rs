/*! Integration tests for comicstore.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - user: Registration, lookup and login through the Gateway
 * - comic: Comic lifecycle, access lists and concurrent panel inserts
 * - store: The InMemory document store and its file persistence
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("comicstore=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}
