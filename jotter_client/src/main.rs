use pico_args::Arguments;
use rustyline::{DefaultEditor, error::ReadlineError};
use std::thread;
use tokio::sync::mpsc::{Receiver, Sender};
use tracing_subscriber::EnvFilter;

mod client;
mod models;
mod view;

use client::ApiClient;
use models::repl::{Command, ServerResponse, UserRequest};
use view::NotesView;

const HISTORY_FILE: &str = ".jotter_history";

/// User REPL loop. Waits for the main loop to ask for the next command,
/// then reads a line and forwards it.
fn repl(mut rx: Receiver<()>, tx: Sender<UserRequest>) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;
    let history_path = dirs_next::home_dir().map(|dir| dir.join(HISTORY_FILE));
    if let Some(path) = &history_path {
        // No history yet on first run.
        let _ = rl.load_history(path);
    }

    while rx.blocking_recv().is_some() {
        let request = loop {
            match rl.readline(">> ") {
                Ok(input) => {
                    if !input.trim().is_empty() {
                        rl.add_history_entry(input.as_str())?;
                    }
                    break match input.parse::<Command>() {
                        Ok(command) => UserRequest::Command(command),
                        Err(err) => UserRequest::Invalid(err),
                    };
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                }
                Err(ReadlineError::Eof) => break UserRequest::Command(Command::Quit),
                Err(err) => return Err(err),
            }
        };
        if tx.blocking_send(request).is_err() {
            break;
        }
    }

    if let Some(path) = &history_path {
        rl.save_history(path)?;
    }
    Ok(())
}

/// Send the current draft to the server. Blank drafts never leave the
/// client, and a failed request leaves the view untouched.
async fn submit_draft(client: &ApiClient, view: &mut NotesView) {
    let Some(text) = view.submittable_draft() else {
        println!("Nothing to add, the draft is empty.");
        return;
    };
    match client.add_note(text).await {
        Ok(note) => {
            println!("{}", view.render_note(&note));
            view.note_added(note);
        }
        Err(err) => tracing::error!("error adding note: {err}"),
    }
}

/// Request a summary in the background so the REPL stays usable while the
/// server waits on the model.
fn start_summary(client: &ApiClient, id: i32, tx: Sender<ServerResponse>) {
    let client = client.clone();
    tokio::spawn(async move {
        let result = client.summarize(id).await.map_err(|err| err.to_string());
        let _ = tx.send(ServerResponse::Summary { id, result }).await;
    });
}

const HELP: &str = "\
Take notes and summarize them

USAGE:
  jotter_client [OPTIONS]

OPTIONS:
  --url     Server API URL      [default: http://localhost:5000/api]

FLAGS:
  -h, --help    Print help information
";

const COMMANDS: &str = "\
COMMANDS:
  list                 Show all notes, newest first
  add <text>           Add a note
  draft <text>         Replace the draft without adding it
  submit               Add the current draft as a note
  summarize <id>       Summarize a note in the background
  help                 Show this message
  quit                 Exit
";

struct Args {
    url: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        println!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        url: pargs
            .value_from_str("--url")
            .unwrap_or("http://localhost:5000/api".into()),
    };
    let client = ApiClient::new(&args.url);

    // The list is fetched once. After that the view only changes through
    // this client's own requests.
    let mut view = NotesView::default();
    match client.list_notes().await {
        Ok(notes) => {
            view.set_notes(notes);
            tracing::info!(count = view.notes().len(), "fetched notes");
        }
        Err(err) => tracing::error!("error fetching notes: {err}"),
    }
    println!("{}", view.render());

    // Channels for all the IPC going on.
    let (start_repl_sender, start_repl_receiver) = tokio::sync::mpsc::channel(1);
    let (user_request_sender, mut user_request_receiver): (
        Sender<UserRequest>,
        Receiver<UserRequest>,
    ) = tokio::sync::mpsc::channel(1);
    let (server_response_sender, mut server_response_receiver): (
        Sender<ServerResponse>,
        Receiver<ServerResponse>,
    ) = tokio::sync::mpsc::channel(16);

    let repl_handle = thread::spawn(|| repl(start_repl_receiver, user_request_sender));

    // Kick-off the user prompt.
    start_repl_sender.send(()).await?;

    // Main loop.
    loop {
        tokio::select! {
            user_request = user_request_receiver.recv() => {
                let Some(user_request) = user_request else { break };
                match user_request {
                    UserRequest::Command(Command::Quit) => break,
                    UserRequest::Command(Command::List) => println!("{}", view.render()),
                    UserRequest::Command(Command::Add(text)) => {
                        view.set_draft(text);
                        submit_draft(&client, &mut view).await;
                    }
                    UserRequest::Command(Command::Draft(text)) => {
                        view.set_draft(text);
                        println!("Draft: {}", view.draft());
                    }
                    UserRequest::Command(Command::Submit) => {
                        submit_draft(&client, &mut view).await;
                    }
                    UserRequest::Command(Command::Summarize(id)) => {
                        match view.begin_summary(id) {
                            Ok(()) => {
                                start_summary(&client, id, server_response_sender.clone());
                                println!("Summarizing note {id}...");
                            }
                            Err(refusal) => println!("Can't summarize: {refusal}"),
                        }
                    }
                    UserRequest::Command(Command::Help) => println!("{COMMANDS}"),
                    UserRequest::Invalid(err) => println!("{err}"),
                }
                start_repl_sender.send(()).await?;
            }
            Some(server_response) = server_response_receiver.recv() => {
                match server_response {
                    ServerResponse::Summary { id, result } => {
                        if let Some(note) = view.finish_summary(id, result).cloned() {
                            println!();
                            println!("{}", view.render_note(&note));
                        }
                    }
                }
            }
        }
    }

    // Let the REPL save its history before exiting.
    drop(start_repl_sender);
    if let Ok(Err(err)) = repl_handle.join() {
        tracing::error!("error in REPL: {err}");
    }
    Ok(())
}
