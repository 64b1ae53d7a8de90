fn main() -> anyhow::Result<()> {
    loopbench::run()
}
