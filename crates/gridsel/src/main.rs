fn main() -> anyhow::Result<()> {
    gridsel::cli::run()
}
