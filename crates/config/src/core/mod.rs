use crate::constants::{GREEN_ANSI_COLOR, RED_ANSI_COLOR, RESET_ANSI_COLOR};
use crate::{ConfigArgs, Configuration};
use eyre::Result;

/// The `config` command is used to display and edit the current configuration.
/// Not using tracing here because it doesnt look good in interactive mode.
pub fn config(args: ConfigArgs) -> Result<()> {
    if args.interactive {
        Configuration::from_interactive()?;
        return Ok(());
    }

    let path = Configuration::path()?;
    if !args.key.is_empty() {
        if !args.value.is_empty() {
            let mut config = Configuration::from_file(&path)?.unwrap_or_default();
            match config.set(&args.key, &args.value).and_then(|_| config.save_to(&path)) {
                Ok(_) => {
                    println!(
                        "{GREEN_ANSI_COLOR}Success: {RESET_ANSI_COLOR}'{}' set to '{}'.",
                        args.key,
                        if args.key == "pinata_api_secret" { "********" } else { args.value.as_str() }
                    );
                    println!(
                        "Configuration: {}\n",
                        serde_json::to_string_pretty(&config.redacted())?
                    );
                }
                Err(e) => println!("{RED_ANSI_COLOR}Error: {RESET_ANSI_COLOR}{}", e),
            };
        } else {
            println!("{RED_ANSI_COLOR}Error: {RESET_ANSI_COLOR}use `chakra config <KEY> <VALUE>` to set a key/value pair, or `chakra config --interactive` to enter interactive mode.");
        }
    } else {
        let config = Configuration::load()?;
        println!("Configuration: {}\n", serde_json::to_string_pretty(&config.redacted())?);
        println!("{GREEN_ANSI_COLOR}Hint: {RESET_ANSI_COLOR}use `chakra config <KEY> <VALUE>` to set a key/value pair, or `chakra config --interactive` to enter interactive mode.");
    }

    Ok(())
}
