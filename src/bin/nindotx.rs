//! Terminal front-end for the NindoTX login flow

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};

use nindotx::config::{ClientOptions, ENV_AUTH_URL, ENV_EXPIRES_IN_MINS};
use nindotx::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "nindotx", version, about = "Log in and land on the NindoTX home view")]
struct Args {
    /// Login endpoint
    #[arg(long, env = ENV_AUTH_URL)]
    endpoint: Option<String>,

    /// Requested token lifetime in minutes
    #[arg(long, env = ENV_EXPIRES_IN_MINS)]
    expires_in_mins: Option<u32>,

    /// Prefill the username field
    #[arg(short, long)]
    username: Option<String>,
}

/// Read one line after printing `label`. `None` means stdin is closed.
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn confirm<R: BufRead>(input: &mut R, label: &str) -> Result<Option<bool>> {
    let answer = prompt(input, &format!("{} [y/N]", label))?;
    Ok(answer.map(|a| matches!(a.trim(), "y" | "Y" | "yes")))
}

/// Username prompt that keeps `current` when the user just hits enter
fn prompt_username<R: BufRead>(input: &mut R, current: &str) -> Result<Option<String>> {
    let label = if current.is_empty() {
        "Username".to_string()
    } else {
        format!("Username [{}]", current)
    };
    Ok(prompt(input, &label)?.map(|name| {
        if name.is_empty() {
            current.to_string()
        } else {
            name
        }
    }))
}

fn home_action<R: BufRead>(input: &mut R) -> Result<HomeAction> {
    loop {
        let Some(choice) = prompt(input, "[l]ogout or [e]xit")? else {
            return Ok(HomeAction::Exit);
        };
        match choice.trim() {
            "l" | "logout" => return Ok(HomeAction::Logout),
            "e" | "exit" | "" => return Ok(HomeAction::Exit),
            other => println!("Unknown choice: {}", other),
        }
    }
}

/// Fill the form from `input`. Returns `false` once stdin is closed.
fn read_form<R: BufRead>(input: &mut R, form: &mut CredentialForm) -> Result<bool> {
    let Some(username) = prompt_username(input, form.username())? else {
        return Ok(false);
    };
    form.set_username(&username);

    let Some(password) = prompt(input, "Password")? else {
        return Ok(false);
    };
    form.set_password(&password);

    let Some(remember_me) = confirm(input, "Remember me")? else {
        return Ok(false);
    };
    form.set_remember_me(remember_me);
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    let args = Args::parse();

    let mut options = ClientOptions::from_env()?;
    if let Some(endpoint) = &args.endpoint {
        options = options.with_login_url(endpoint);
    }
    if let Some(mins) = args.expires_in_mins {
        options = options.with_expires_in_mins(mins);
    }

    let client = NindoTx::new_with_options(options)?;
    let mut screen = client.login_screen();
    let mut navigator = Navigator::new();

    if let Some(username) = &args.username {
        screen.form_mut().set_username(username);
    }

    println!("NindoTX {}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        match navigator.current().clone() {
            Route::Login => {
                if !read_form(&mut input, screen.form_mut())? {
                    println!();
                    break;
                }

                println!("Logging in...");
                if let Some(route) = screen.submit().await? {
                    navigator.navigate(route);
                }
                if let Some(alert) = screen.alert() {
                    println!("{}: {}", alert.title(), alert);
                    screen.dismiss_alert();
                    screen.form_mut().set_password("");
                }
            }
            route @ Route::Home { .. } => {
                if let Some(home) = HomeView::from_route(&route) {
                    println!("{}", home.greeting());
                }
                match home_action(&mut input)? {
                    HomeAction::Logout => {
                        screen.on_logout();
                        navigator.pop_back();
                    }
                    HomeAction::Exit => break,
                }
            }
        }
    }

    Ok(())
}
