fn main() -> anyhow::Result<()> {
    ghfilter::run()
}
