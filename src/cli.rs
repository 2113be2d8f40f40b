use anyhow::{Result, anyhow};
use log::info;
use pico_args::Arguments;
use std::{env, fs::File, io::BufReader};

use crate::config::{Profile, ProfileStore};
use crate::input;
use crate::progress::angle_for_point;
use crate::tracker::Point;

pub fn run() -> Result<()> {
    let mut pargs = Arguments::from_env();

    // No args -> general help
    if env::args().len() == 1 {
        print_help();
        return Ok(());
    }

    if pargs.contains("-h") || pargs.contains("--help") {
        print_help();
        return Ok(());
    }

    let subcmd: Option<String> = pargs.free_from_str().ok();

    match subcmd.as_deref() {
        Some("help") => {
            let topic: Option<String> = pargs.free_from_str().ok();
            if let Some(t) = topic {
                print_subcmd_help(&t);
            } else {
                print_help();
            }
            Ok(())
        }

        Some("replay") => {
            let profile_name: Option<String> = pargs.opt_value_from_str("--profile")?;
            let path: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: ringseek replay <trace.jsonl> [--profile NAME]"))?;
            let profile = resolve_profile(profile_name.as_deref())?;
            replay(&path, &profile)
        }

        Some("angle") => {
            let size: Option<String> = pargs.opt_value_from_str("--size")?;
            let x: f32 = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: ringseek angle <x> <y> [--size WxH]"))?;
            let y: f32 = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: ringseek angle <x> <y> [--size WxH]"))?;
            let (w, h) = match size {
                Some(s) => parse_size(&s)?,
                None => {
                    let p = resolve_profile(None)?;
                    (p.ring.width, p.ring.height)
                }
            };
            let center = Point::new(w / 2.0, h / 2.0);
            let a = angle_for_point(center, Point::new(x, y));
            print_response(&serde_json::json!({
                "center": [center.x, center.y],
                "angle": a,
            }));
            Ok(())
        }

        Some("list") => {
            let store = ProfileStore::open_default()?;
            store.load_or_install_default()?;
            let active = store.active_name()?;
            for name in store.list_profiles() {
                let mark = if name == active { "*" } else { " " };
                println!("{mark} {name}");
            }
            Ok(())
        }

        Some("use") => {
            let name: String = pargs
                .free_from_str()
                .map_err(|_| anyhow!("usage: ringseek use <profile_name>"))?;
            let store = ProfileStore::open_default()?;
            store.load_or_install_default()?;
            store.set_active(&name)?;
            println!("ok: active profile is {name}");
            Ok(())
        }

        Some("show") => {
            let name: Option<String> = pargs.free_from_str().ok();
            let profile = resolve_profile(name.as_deref())?;
            print_response(&serde_json::to_value(&profile)?);
            Ok(())
        }

        Some(other) => {
            eprintln!("unknown subcommand: {other}\n");
            print_help();
            Ok(())
        }

        None => {
            print_help();
            Ok(())
        }
    }
}

fn resolve_profile(name: Option<&str>) -> Result<Profile> {
    let store = ProfileStore::open_default()?;
    let (active, profile) = store.load_or_install_default()?;
    match name {
        Some(n) if n != active => Ok(store.load(n)?),
        _ => Ok(profile),
    }
}

fn replay(path: &str, profile: &Profile) -> Result<()> {
    let f = File::open(path).map_err(|e| anyhow!("failed to open {path}: {e}"))?;
    let events = input::read_trace(BufReader::new(f))?;
    info!("replaying {} samples from {path}", events.len());

    let mut bar = profile.build_seekbar();
    for ev in &events {
        if let Some(out) = bar.handle_touch(ev) {
            let mut line = serde_json::to_value(out)?;
            line["t"] = serde_json::json!(ev.t);
            println!("{line}");
        }
    }

    print_response(&serde_json::json!({
        "progress": bar.progress(),
        "angle": bar.current_angle(),
        "text": bar.progress_text(),
        "tracking": bar.is_tracking(),
    }));
    Ok(())
}

fn parse_size(s: &str) -> Result<(f32, f32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| anyhow!("size must look like 400x300, got '{s}'"))?;
    let w: f32 = w.trim().parse().map_err(|_| anyhow!("bad width in '{s}'"))?;
    let h: f32 = h.trim().parse().map_err(|_| anyhow!("bad height in '{s}'"))?;
    Ok((w, h))
}

fn print_help() {
    println!(
        r#"ringseek — circular seek bar touch model

USAGE:
  ringseek help [command]                          Show general or command-specific help
  ringseek replay <trace.jsonl> [--profile NAME]   Feed a touch trace and print events
  ringseek angle <x> <y> [--size WxH]              Angle of a point around the ring center
  ringseek list                                    List profiles
  ringseek use <name>                              Switch active profile
  ringseek show [name]                             Print a profile as JSON

TRACE FORMAT (one JSON object per line):
  {{"phase":"down","x":200,"y":40,"t":0}}
  phase is one of down, move, up, cancel; t is in milliseconds
"#
    );
}

fn print_subcmd_help(cmd: &str) {
    match cmd {
        "replay" => println!(
            "usage: ringseek replay <trace.jsonl> [--profile NAME]\nRuns the samples through a seek bar built from the profile."
        ),
        "angle" => println!(
            "usage: ringseek angle <x> <y> [--size WxH]\n0 is north, clockwise positive, not normalised."
        ),
        "list" => println!("usage: ringseek list\nLists available profiles; marks active with '*'."),
        "use" => println!("usage: ringseek use <name>\nSwitches active profile to <name>."),
        "show" => println!("usage: ringseek show [name]\nPrints the named or active profile."),
        _ => {
            eprintln!("unknown command: {cmd}\n");
            print_help();
        }
    }
}

fn print_response(v: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(v).unwrap_or_default());
}
