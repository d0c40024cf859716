use clap::{CommandFactory, Parser};
use wmaze::{
    cli::Args,
    commands::{self, Context},
    logging,
    settings::Settings,
    AppError,
};

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if args.reset_config {
        Settings::reset_config(&Settings::default_path()?)?;
        return Ok(());
    }

    if args.show_config_path {
        let settings_path = Settings::default_path()?;
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    if args.debug_config {
        println!("{:#?}", Settings::load(&Settings::default_path()?)?.populate());
        return Ok(());
    }

    better_panic::install();

    // a broken settings file shouldn't lock anyone out, report it once logging is up
    let loaded = Settings::default_path().and_then(|path| Settings::load(&path));
    let settings = loaded.as_ref().cloned().unwrap_or_default();

    logging::init(args.log_level(settings.get_log_level().into()))?;
    if let Err(err) = &loaded {
        log::warn!("{}, using default settings", err);
    }

    let Some(command) = args.command else {
        Args::command().print_help()?;
        return Ok(());
    };

    let ctx = Context::new(settings, args.strict);
    commands::run(command, &ctx)
}
