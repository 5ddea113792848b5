fn main() -> anyhow::Result<()> {
    // The pipeline runs one stage at a time on a single thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(anicat::run())
}
