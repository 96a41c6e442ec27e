//! Acceptance run
//!
//! Drives two channels the way the character-device acceptance script does:
//! write then read, wrap-around, a second channel keeping its own message,
//! and three handles reading one channel in parallel.

use chardev_channels::{ChannelAccess, ChannelConfig, Result};
use std::io::{Read, Write};

fn check(what: &str, got: &[u8], want: &[u8]) -> bool {
    if got == want {
        println!("  ok    {}", what);
        true
    } else {
        println!(
            "  FAIL  {}: got {:?}, want {:?}",
            what,
            String::from_utf8_lossy(got),
            String::from_utf8_lossy(want)
        );
        false
    }
}

fn run(access: &ChannelAccess) -> Result<bool> {
    let mut pass = true;

    println!("[Acceptance] Basic write then read");
    let mut fd1 = access.session(0)?;
    pass &= fd1.write(b"Hello World").map(|n| n == 11).unwrap_or(false);
    pass &= check("first 5", &access.read_to_vec(fd1.handle(), 5)?, b"Hello");
    pass &= check("next 6", &access.read_to_vec(fd1.handle(), 6)?, b" World");
    pass &= check("wrapped", &access.read_to_vec(fd1.handle(), 13)?, b"Hello World");
    pass &= check("over-long read", &access.read_to_vec(fd1.handle(), 17)?, b"Hello World");
    fd1.close()?;

    println!("[Acceptance] Second channel");
    let mut fd1 = access.session(1)?;
    pass &= fd1.write_all(b"Second Message").is_ok();
    let mut second = [0u8; 14];
    pass &= fd1.read_exact(&mut second).is_ok();
    pass &= check("second message", &second, b"Second Message");

    let fd2 = access.session(0)?;
    pass &= check("first kept", &access.read_to_vec(fd2.handle(), 20)?, b"Hello World");
    fd1.close()?;

    println!("[Acceptance] Parallel handles");
    let fd3 = access.open(0)?;
    let fd4 = access.open(0)?;
    let fd5 = access.open(0)?;
    pass &= check("fd3 head", &access.read_to_vec(fd3, 6)?, b"Hello ");
    pass &= check("fd4 head", &access.read_to_vec(fd4, 7)?, b"Hello W");
    pass &= check("fd5 head", &access.read_to_vec(fd5, 8)?, b"Hello Wo");
    pass &= check("fd3 tail", &access.read_to_vec(fd3, 5)?, b"World");
    pass &= check("fd4 tail", &access.read_to_vec(fd4, 4)?, b"orld");
    pass &= check("fd5 tail", &access.read_to_vec(fd5, 3)?, b"rld");
    access.close(fd3)?;
    access.close(fd4)?;
    access.close(fd5)?;
    fd2.close()?;

    Ok(pass)
}

fn main() {
    env_logger::init();

    let access = match ChannelAccess::with_config(&ChannelConfig::default()) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("[Acceptance] Failed to create channels: {}", e);
            std::process::exit(1);
        }
    };

    match run(&access) {
        Ok(true) => println!("PASS!"),
        Ok(false) => {
            println!("FAIL");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("[Acceptance] {}", e);
            std::process::exit(1);
        }
    }
}
