fn main() -> anyhow::Result<()> {
    powbench::run()
}
