use anyhow::Result;

/// Everything habitual does happens one step after another, so a current thread runtime is all
/// that's needed.
pub fn single_thread_runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}
