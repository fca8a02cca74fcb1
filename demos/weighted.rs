use montedie::prelude::*;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let loaded = d6();
    loaded.change_weight(&6, 3.5)?;
    for (face, p) in loaded.probabilities()? {
        println!("{face}: {:5.1}%", p * 100.0);
    }

    let session = Session::from_dice(vec![d6(), loaded])?;
    session.play(5)?;
    let format: ResultFormat = std::env::args()
        .nth(1)
        .as_deref()
        .unwrap_or("wide")
        .parse()?;
    match session.results(format)? {
        Results::Wide(t) => print!("{t}"),
        Results::Narrow(t) => print!("{t}"),
    }

    let analyzer = Analyzer::new(&session);
    print!("{}", analyzer.face_counts()?);
    for (face, total) in analyzer.face_totals()? {
        println!("{face}: {total}");
    }
    Ok(())
}
