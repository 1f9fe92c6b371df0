pub fn run() -> anyhow::Result<()> {
    let snapshot = options_amm::example::snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
