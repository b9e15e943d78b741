//! savestate-tool: inspect and edit crash-recovery EEPROM images.
//!
//! Usage:
//!   savestate-tool inspect   --image game.eep [--kind 4k] [--minigames snake,sumo]
//!   savestate-tool preview   --image game.eep --minigames snake,sumo [--config store.json]
//!   savestate-tool format    --image game.eep
//!   savestate-tool clear     --image game.eep [--config store.json]
//!   savestate-tool blacklist --image game.eep --set 0,3,7 [--count 12]
//!
//! `--minigames` lists the minigame names in registration order.
//! `--config` is a store config file, e.g. `{ "verify_checksum": false }`.

use anyhow::{bail, Context, Result};
use savestate_core::{
    device::{EepromDevice, EepromKind, FileEeprom},
    game::{MemoryGameState, MinigameRegistry},
    record::{image_checksum, image_checksum_valid, SaveRecord, RECORD_SIZE},
    types::BLACKLIST_CAPACITY,
    SaveMode, SaveStateStore, StoreConfig,
};
use serde::Serialize;
use std::env;

struct ToolConfig {
    store:     StoreConfig,
    minigames: MinigameRegistry,
}

impl ToolConfig {
    fn from_args(args: &[String]) -> Result<Self> {
        let store = match find_arg(args, "--config") {
            Some(path) => StoreConfig::load(path)
                .with_context(|| format!("Cannot read config {path}"))?,
            None => StoreConfig::default(),
        };
        let minigames = find_arg(args, "--minigames")
            .map(|list| {
                MinigameRegistry::new(list.split(',').map(str::trim).filter(|n| !n.is_empty()))
            })
            .unwrap_or_default();
        log::debug!("Store config: {store:?}, {} minigames", minigames.len());
        Ok(Self { store, minigames })
    }
}

#[derive(Serialize)]
struct Inspection {
    formatted:         bool,
    checksum_valid:    bool,
    computed_checksum: u8,
    record:            SaveRecord,
    /// Names of blacklisted minigames, when the config lists them.
    blacklisted:       Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some(command) = args.get(1).map(String::as_str) else {
        bail!("missing command (inspect | preview | format | clear | blacklist)");
    };
    let image = find_arg(&args, "--image").context("--image <path> is required")?;
    let kind_arg = find_arg(&args, "--kind").unwrap_or("4k");
    let kind = EepromKind::from_str(kind_arg)
        .with_context(|| format!("unknown EEPROM kind '{kind_arg}'"))?;
    if !kind.is_present() {
        bail!("--kind none has no image to work on");
    }
    let config = ToolConfig::from_args(&args)?;

    let chip = FileEeprom::open(image, kind)
        .with_context(|| format!("Cannot open image {image}"))?;

    match command {
        "inspect" => inspect(chip, &config),
        "preview" => preview(chip, config),
        "format" => format_image(chip),
        "clear" => clear(chip, config),
        "blacklist" => {
            let set = find_arg(&args, "--set").context("--set <i,j,..> is required")?;
            let count = parse_arg(&args, "--count", config.minigames.len().max(1));
            blacklist(chip, config, set, count)
        }
        other => bail!("unknown command '{other}'"),
    }
}

/// Decode the stored bytes as they are, without formatting anything.
fn inspect(mut chip: FileEeprom, config: &ToolConfig) -> Result<()> {
    let mut bytes = [0u8; RECORD_SIZE];
    chip.read_bytes(0, &mut bytes)?;
    let record = SaveRecord::decode(&bytes);

    let count = config.minigames.len().min(BLACKLIST_CAPACITY);
    let blacklisted = config
        .minigames
        .names()
        .take(count)
        .enumerate()
        .filter(|(i, _)| (record.blacklist >> i) & 1 == 1)
        .map(|(_, name)| name.to_string())
        .collect();

    let inspection = Inspection {
        formatted: record.is_formatted(),
        checksum_valid: image_checksum_valid(&bytes),
        computed_checksum: image_checksum(&bytes),
        record,
        blacklisted,
    };
    println!("{}", serde_json::to_string_pretty(&inspection)?);
    Ok(())
}

/// Show the game state a restore would produce.
fn preview(chip: FileEeprom, config: ToolConfig) -> Result<()> {
    let mut store = SaveStateStore::new(chip, config.store);
    store.initialize()?;
    if !store.crashed() {
        println!("No crashed match stored.");
        return Ok(());
    }

    let mut game = MemoryGameState::default();
    store.load(&mut game, &config.minigames)?;
    println!("{}", serde_json::to_string_pretty(&game)?);
    Ok(())
}

fn format_image(mut chip: FileEeprom) -> Result<()> {
    chip.write_bytes(0, &SaveRecord::formatted().encode())?;
    println!("Wrote a blank formatted record.");
    Ok(())
}

fn clear(chip: FileEeprom, config: ToolConfig) -> Result<()> {
    let mut store = SaveStateStore::new(chip, config.store);
    store.initialize()?;
    let was_crashed = store.crashed();
    store.clear()?;
    println!("Crash flag cleared (was {was_crashed}).");
    Ok(())
}

fn blacklist(chip: FileEeprom, config: ToolConfig, set: &str, count: usize) -> Result<()> {
    let mut flags = vec![false; count];
    for part in set.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let index = match part.parse::<usize>() {
            Ok(index) => index,
            Err(_) => config
                .minigames
                .index_of(part)
                .with_context(|| format!("'{part}' is neither an index nor a known minigame"))?,
        };
        let Some(flag) = flags.get_mut(index) else {
            bail!("minigame index {index} is outside --count {count}");
        };
        *flag = true;
    }

    let mut store = SaveStateStore::new(chip, config.store);
    store.initialize()?;
    store.set_blacklist(&flags)?;
    store.save(SaveMode::ConfigOnly, &MemoryGameState::default())?;

    let excluded: Vec<usize> = flags
        .iter()
        .enumerate()
        .filter_map(|(i, &f)| f.then_some(i))
        .collect();
    log::info!("Blacklist written: {excluded:?}");
    println!("Blacklisted minigames: {excluded:?} of {count}");
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
