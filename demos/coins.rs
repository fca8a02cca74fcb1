use montedie::prelude::*;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let fair = coin();
    let unfair = coin();
    unfair.change_weight(&"H", 5)?;
    println!("unfair coin:\n{unfair}");

    let session = Session::from_dice(vec![fair, unfair.clone(), unfair])?;
    let analyzer = Analyzer::new(&session);

    for rolls in [10, 1000] {
        session.play(rolls)?;
        println!(
            "rolls = {rolls} jackpots = {} rate = {:.3}",
            analyzer.jackpot()?,
            analyzer.jackpot_rate()?
        );
    }

    println!("{}", analyzer.combo_count()?);
    println!("{}", analyzer.permutation_count()?);
    Ok(())
}
