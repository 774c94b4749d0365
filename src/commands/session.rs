use anyhow::Result;
use dialoguer::Input;
use owo_colors::OwoColorize;

use daymark_core::Daymark;

pub fn login(daymark: &mut Daymark, identity: Option<String>) -> Result<()> {
    let identity = match identity {
        Some(identity) => identity,
        None => Input::<String>::new()
            .with_prompt("  Email")
            .interact_text()?,
    };

    daymark.login(&identity)?;

    println!(
        "Logged in as {} ({} tags, {} marks)",
        identity.trim().green(),
        daymark.tag_count(),
        daymark.all_marks().len()
    );
    Ok(())
}

pub fn logout(daymark: &mut Daymark) -> Result<()> {
    if daymark.is_anonymous() {
        println!("Not logged in");
        return Ok(());
    }

    daymark.logout();
    println!("Logged out. Anonymous marks are not saved between runs.");
    Ok(())
}

pub fn whoami(daymark: &Daymark) -> Result<()> {
    match daymark.current_identity() {
        Some(session) => {
            println!(
                "{} (since {})",
                session.identity.green(),
                session.login_at.format("%Y-%m-%d %H:%M UTC")
            );
        }
        None => println!("{}", "anonymous session".dimmed()),
    }
    Ok(())
}
