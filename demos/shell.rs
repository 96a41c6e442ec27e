//! Example Shell
//!
//! Interactive front end over an in-process channel table. Each `open`
//! hands out a numbered handle; reads and writes go through that handle
//! exactly as they would through a file descriptor on a device node.

use chardev_channels::{ChannelAccess, ChannelConfig, HandleId};
use std::io::{self, BufRead, Write};

fn print_help() {
    println!("Commands:");
    println!("  open <ch>          - Open a handle on channel <ch>");
    println!("  read <h> <n>       - Read up to <n> bytes through handle <h>");
    println!("  write <h> <text>   - Replace the channel message through handle <h>");
    println!("  close <h>          - Close handle <h>");
    println!("  cursor <h>         - Show the read cursor of handle <h>");
    println!("  dump               - Show every channel's message");
    println!("  exit               - Exit this shell");
    println!("  help               - Show this help");
}

/// Handles handed out so far; closed handles stay listed so reuse is reported
struct Shell {
    access: ChannelAccess,
    handles: Vec<HandleId>,
}

fn main() {
    env_logger::init();

    let config = ChannelConfig {
        channel_count: std::env::args()
            .nth(1)
            .and_then(|s| s.parse().ok())
            .unwrap_or(chardev_channels::DEFAULT_CHANNEL_COUNT),
        ..Default::default()
    };

    println!("╔══════════════════════════════════════════════════╗");
    println!("║            Channel Shell (Rust Edition)          ║");
    println!("╚══════════════════════════════════════════════════╝");
    println!();

    let access = match ChannelAccess::with_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[Shell] Failed to create channels: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "[Shell] {} channels, {} bytes per message",
        config.channel_count, config.max_message_len
    );
    println!("[Shell] Type 'help' for available commands");
    println!();

    let mut shell = Shell {
        access,
        handles: Vec::new(),
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!(">>> ");
        let _ = stdout.flush();

        let mut input = String::new();
        match stdin.lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        if input == "exit" {
            println!("[Shell] Goodbye!");
            break;
        }

        shell.execute(input);
        println!();
    }
}

impl Shell {
    fn execute(&mut self, input: &str) {
        let mut parts = input.splitn(3, ' ');
        let cmd = parts.next().unwrap_or("");
        let first = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("");

        match cmd {
            "help" => print_help(),

            "open" => match first.parse() {
                Ok(channel) => match self.access.open(channel) {
                    Ok(handle) => {
                        self.handles.push(handle);
                        println!("[Shell] Handle {} on channel {}", self.handles.len(), channel);
                    }
                    Err(e) => println!("[Shell] {}", e),
                },
                Err(_) => println!("[Shell] Usage: open <ch>"),
            },

            "read" => {
                let Some(handle) = self.lookup(first) else { return };
                let count = rest.trim().parse().unwrap_or(chardev_channels::DEFAULT_MAX_MESSAGE_LEN);
                match self.access.read_to_vec(handle, count) {
                    Ok(bytes) => println!(
                        "[Shell] Read {} bytes: {:?}",
                        bytes.len(),
                        String::from_utf8_lossy(&bytes)
                    ),
                    Err(e) => println!("[Shell] {}", e),
                }
            }

            "write" => {
                let Some(handle) = self.lookup(first) else { return };
                match self.access.write(handle, rest.as_bytes()) {
                    Ok(n) => println!("[Shell] Wrote {} of {} bytes", n, rest.len()),
                    Err(e) => println!("[Shell] {}", e),
                }
            }

            "close" => {
                let Some(handle) = self.lookup(first) else { return };
                match self.access.close(handle) {
                    Ok(()) => println!("[Shell] Closed handle {}", first),
                    Err(e) => println!("[Shell] {}", e),
                }
            }

            "cursor" => {
                let Some(handle) = self.lookup(first) else { return };
                match self.access.cursor_record(handle) {
                    Ok(c) => println!("[Shell] Channel {}, cursor {}", c.channel(), c.offset()),
                    Err(e) => println!("[Shell] {}", e),
                }
            }

            "dump" => {
                let store = self.access.store();
                for channel in 0..store.channel_count() {
                    if let Ok(snap) = store.get_message(channel) {
                        println!(
                            "[Shell] Channel {}: {} bytes (write #{}) {:?}",
                            channel,
                            snap.len(),
                            snap.generation,
                            String::from_utf8_lossy(&snap.bytes)
                        );
                    }
                }
                println!("[Shell] Open handles: {}", self.access.open_handles());
            }

            _ => println!("[Shell] Unknown command: {} (try 'help')", cmd),
        }
    }

    fn lookup(&self, arg: &str) -> Option<HandleId> {
        let handle = arg
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.handles.get(i).copied());
        if handle.is_none() {
            println!("[Shell] No handle '{}'", arg);
        }
        handle
    }
}
