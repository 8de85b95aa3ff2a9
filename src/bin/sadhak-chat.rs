//! Interactive chat with the donor-support assistant.
//!
//! This binary provides a terminal REPL for the Seva assistant service.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; set your mobile number before the first message
//! sadhak-chat --mobile +919876543210 --name "Asha"
//!
//! # Point at a local service
//! sadhak-chat --url http://localhost:8000/message
//!
//! # Disable colors (useful for piping output)
//! sadhak-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/mobile <number>` - Set your mobile number
//! - `/clear` - Clear the transcript
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application
//!
//! A message beginning with `http://` or `https://` is sent as an image
//! reference; anything else is sent as text.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use sadhak::Sadhak;
use sadhak::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PlainTextRenderer, Renderer, help_text,
    parse_command,
};

/// Main entry point for the sadhak-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("sadhak-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let client = Sadhak::with_options(config.api_url.clone(), None)?;
    let mut session = ChatSession::new(client, config);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag for interrupts while a request is pending.  Requests cannot be
    // cancelled; the interrupt is acknowledged after the fact.
    let interrupted = Arc::new(AtomicBool::new(false));

    // Set up Ctrl+C handler
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Seva donor-support assistant ({})", session.api_url());
    println!("Type /help for commands, /quit to exit\n");
    if !session.profile().has_mobile_number() {
        renderer.print_info("Set your mobile number with /mobile before sending a message.");
    }

    loop {
        // Reset interrupt flag before each input
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Transcript cleared.");
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Mobile(mobile) => {
                            session.set_mobile_number(mobile.clone());
                            renderer.print_info(&format!("Mobile number set to: {}", mobile));
                        }
                        ChatCommand::Name(name) => {
                            session.set_donor_name(name.clone());
                            renderer.print_info(&format!("Name set to: {}", name));
                        }
                        ChatCommand::DonorCode(code) => {
                            session.set_donor_code(code);
                            if code == 0 {
                                renderer.print_info("Donor code cleared (0 = unknown).");
                            } else {
                                renderer.print_info(&format!("Donor code set to {code}"));
                            }
                        }
                        ChatCommand::Url(url) => match session.set_api_url(&url) {
                            Ok(_) => renderer.print_info(&format!("Endpoint changed to: {}", url)),
                            Err(err) => {
                                renderer.print_error(&format!("Failed to change endpoint: {}", err))
                            }
                        },
                        ChatCommand::Save(path) => match session.save_transcript_to(&path) {
                            Ok(_) => renderer.print_info(&format!("Transcript saved to {}", path)),
                            Err(err) => renderer
                                .print_error(&format!("Failed to save transcript: {}", err)),
                        },
                        ChatCommand::Load(path) => match session.load_transcript_from(&path) {
                            Ok(_) => {
                                renderer.print_info(&format!("Transcript loaded from {}", path))
                            }
                            Err(err) => renderer
                                .print_error(&format!("Failed to load transcript: {}", err)),
                        },
                        ChatCommand::Stats => {
                            print_stats(&session);
                        }
                        ChatCommand::ShowConfig => {
                            print_config(&session);
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the assistant
                if let Err(e) = session.send(line, &mut renderer).await {
                    renderer.print_error(&e.to_string());
                }
                if interrupted.load(Ordering::Relaxed) {
                    renderer
                        .print_info("Interrupt noted; the pending request could not be cancelled.");
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Total messages: {}", stats.total_turns);
    println!("      Your messages: {}", stats.user_turns);
    println!("      Assistant responses: {}", stats.assistant_turns);
    println!("      Requests made: {}", stats.total_requests);
    print_profile(&stats);
}

fn print_config(session: &ChatSession) {
    let stats = session.stats();
    println!("    Current Configuration:");
    println!("      Endpoint: {}", stats.api_url);
    print_profile(&stats);
}

fn print_profile(stats: &sadhak::chat::SessionStats) {
    if stats.mobile_number.is_empty() {
        println!("      Mobile number: (not set)");
    } else {
        println!("      Mobile number: {}", stats.mobile_number);
    }
    if stats.donor_name.is_empty() {
        println!("      Name: (not set)");
    } else {
        println!("      Name: {}", stats.donor_name);
    }
    if stats.donor_code == 0 {
        println!("      Donor code: (unknown)");
    } else {
        println!("      Donor code: {}", stats.donor_code);
    }
}
