fn main() -> anyhow::Result<()> {
    paperfold::run(paperfold::SceneConfig::default())
}
