fn main() -> anyhow::Result<()> {
    forceview::run()
}
