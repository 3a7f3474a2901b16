//! REPL (Read-Eval-Print Loop) for interactive cooking chat

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::config::ReplConfig;
use dishmuse_application::{
    FilterVisionLabelsUseCase, GeneratePlatingImagesUseCase, HandleTurnUseCase,
};
use dishmuse_domain::{
    ControlAction, ControlHints, RecipeCard, TurnRequest, TurnResponse, parse_label_list,
    requests_shopping_list,
};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

const PLATING_REQUEST: &str = "Yes, show me some plating ideas!";
const LIKE_CONFIRMATION: &str = "Saved as a favorite. Happy cooking! 💛";

/// A parsed line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free text sent to the assistant
    Message(String),
    /// Raw vision labels to filter and send as ingredients
    Photo(String),
    Like,
    Download,
    Save(Option<PathBuf>),
    Have,
    Plating,
    InStore,
    Help,
    Quit,
    Unknown(String),
}

/// Parse one trimmed, non-empty input line.
pub fn parse_command(line: &str) -> ReplCommand {
    if !line.starts_with('/') {
        return ReplCommand::Message(line.to_string());
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "/quit" | "/exit" | "/q" => ReplCommand::Quit,
        "/help" | "/h" | "/?" => ReplCommand::Help,
        "/photo" => ReplCommand::Photo(rest.to_string()),
        "/like" => ReplCommand::Like,
        "/download" => ReplCommand::Download,
        "/save" if rest.is_empty() => ReplCommand::Save(None),
        "/save" => ReplCommand::Save(Some(PathBuf::from(rest))),
        "/have" => ReplCommand::Have,
        "/plating" => ReplCommand::Plating,
        "/instore" => ReplCommand::InStore,
        _ => ReplCommand::Unknown(name.to_string()),
    }
}

/// Default file name for a saved recipe card.
pub fn recipe_file_name(card: &RecipeCard) -> String {
    let stem: String = card
        .name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if stem.is_empty() {
        "recipe.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    handle_turn: Arc<HandleTurnUseCase>,
    vision: Arc<FilterVisionLabelsUseCase>,
    images: Arc<GeneratePlatingImagesUseCase>,
    config: ReplConfig,
    session_key: Option<String>,
    last_card: Option<RecipeCard>,
    last_response: Option<TurnResponse>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(
        handle_turn: Arc<HandleTurnUseCase>,
        vision: Arc<FilterVisionLabelsUseCase>,
        images: Arc<GeneratePlatingImagesUseCase>,
    ) -> Self {
        Self {
            handle_turn,
            vision,
            images,
            config: ReplConfig::default(),
            session_key: None,
            last_card: None,
            last_response: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            match rl.readline("you> ") {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line);

                    if self.dispatch(parse_command(line)).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        DishMuse - What's in your kitchen?   │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Tell me what you have, or type /help for commands.");
        println!();
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /photo a, b, c  - Send detected image labels as ingredients");
        println!("  /have           - Show tracked ingredients");
        println!("  /plating        - Ask for plating ideas and images");
        println!("  /like           - Mark the current recipe as a favorite");
        println!("  /download       - Mark the current recipe as downloaded");
        println!("  /save [path]    - Save the current recipe to a file");
        println!(
            "  /instore        - Toggle in-store-only suggestions (now {})",
            if self.config.prefer_in_store_only { "on" } else { "off" }
        );
        println!("  /help, /h, /?   - Show this help");
        println!("  /quit, /exit, /q - Exit chat");
        println!();
    }

    /// Handle one parsed command. Returns true if the REPL should exit.
    async fn dispatch(&mut self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => self.print_help(),
            ReplCommand::Message(text) => {
                let hints = self.hints(requests_shopping_list(&text));
                self.send(TurnRequest::text(text).with_hints(hints)).await;
            }
            ReplCommand::Photo(raw) => self.send_photo(&raw).await,
            ReplCommand::Like => {
                if self.send_action(ControlAction::Like).await {
                    println!("{}\n", LIKE_CONFIRMATION);
                }
            }
            ReplCommand::Download => {
                self.send_action(ControlAction::Download).await;
            }
            ReplCommand::Save(path) => self.save_recipe(path).await,
            ReplCommand::Have => match &self.last_response {
                Some(response) => println!(
                    "{}",
                    ConsoleFormatter::format_inventory(
                        &response.have_ingredients,
                        &response.missing_ingredients
                    )
                ),
                None => println!("{}\n", ConsoleFormatter::format_inventory(&[], &[])),
            },
            ReplCommand::Plating => self.request_plating().await,
            ReplCommand::InStore => {
                self.config.prefer_in_store_only = !self.config.prefer_in_store_only;
                println!(
                    "In-store-only suggestions {}.\n",
                    if self.config.prefer_in_store_only { "on" } else { "off" }
                );
            }
            ReplCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        false
    }

    fn hints(&self, force_grocery_stage: bool) -> ControlHints {
        ControlHints {
            prefer_in_store_only: self.config.prefer_in_store_only,
            force_grocery_stage,
            action: None,
        }
    }

    fn keyed(&self, request: TurnRequest) -> TurnRequest {
        match &self.session_key {
            Some(key) => request.with_session_key(key.clone()),
            None => request,
        }
    }

    /// Run a turn and print it. Returns the response when it succeeded.
    async fn send(&mut self, request: TurnRequest) -> Option<TurnResponse> {
        let request = self.keyed(request);
        let progress = ProgressReporter::with_visibility(self.config.show_progress);
        progress.start("Thinking...");
        let result = self.handle_turn.execute(request).await;
        progress.finish();

        match result {
            Ok(response) => {
                self.session_key = Some(response.session_key.as_str().to_string());
                if let Some(card) = &response.recipe_card {
                    self.last_card = Some(card.clone());
                }
                if response.dismiss_recipe {
                    self.last_card = None;
                }
                let output = ConsoleFormatter::format_response(&response);
                if !output.is_empty() {
                    println!("{}", output);
                }
                self.last_response = Some(response.clone());
                Some(response)
            }
            Err(e) => {
                tracing::debug!("Turn failed: {}", e);
                eprintln!("{}\n", ConsoleFormatter::format_error(e.user_message()));
                None
            }
        }
    }

    async fn send_action(&mut self, action: ControlAction) -> bool {
        if self.last_card.is_none() {
            println!("There is no recipe on the table yet.\n");
            return false;
        }
        self.send(TurnRequest::action(action)).await.is_some()
    }

    async fn send_photo(&mut self, raw: &str) {
        let raw_labels = parse_label_list(raw);
        if raw_labels.is_empty() {
            println!("Usage: /photo tomato, onion, cutting board\n");
            return;
        }

        let labels = match self.vision.execute(&raw_labels).await {
            Ok(filtered) if !filtered.is_empty() => filtered,
            Ok(_) => {
                println!("I couldn't spot any ingredients in that photo.\n");
                return;
            }
            Err(e) => {
                tracing::warn!("Vision filtering failed, using raw labels: {}", e);
                raw_labels
            }
        };

        println!("Spotted: {}\n", labels.join(", "));
        let hints = self.hints(false);
        self.send(TurnRequest::image_labels(labels).with_hints(hints))
            .await;
    }

    async fn save_recipe(&mut self, path: Option<PathBuf>) {
        let Some(card) = self.last_card.clone() else {
            println!("There is no recipe on the table yet.\n");
            return;
        };
        let path = path.unwrap_or_else(|| PathBuf::from(recipe_file_name(&card)));

        match std::fs::write(&path, card.to_plain_text()) {
            Ok(()) => {
                println!("Saved recipe to {}\n", path.display());
                self.send(TurnRequest::action(ControlAction::Download)).await;
            }
            Err(e) => eprintln!(
                "{}\n",
                ConsoleFormatter::format_error(&format!("Could not write {}: {}", path.display(), e))
            ),
        }
    }

    async fn request_plating(&mut self) {
        let dish = self
            .last_card
            .as_ref()
            .map(|card| card.name.clone())
            .unwrap_or_else(|| "the dish".to_string());

        let hints = self.hints(false);
        let Some(response) = self
            .send(TurnRequest::text(PLATING_REQUEST).with_hints(hints))
            .await
        else {
            return;
        };

        if !self.images.is_available() {
            return;
        }

        let progress = ProgressReporter::with_visibility(self.config.show_progress);
        progress.start("Sketching plating ideas...");
        let images = self.images.execute(&response.reply, &dish).await;
        progress.finish();
        println!("{}", ConsoleFormatter::format_plating_images(&images));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            parse_command("I have eggs"),
            ReplCommand::Message("I have eggs".to_string())
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_command("/quit"), ReplCommand::Quit);
        assert_eq!(parse_command("/q"), ReplCommand::Quit);
        assert_eq!(parse_command("/?"), ReplCommand::Help);
        assert_eq!(parse_command("/like"), ReplCommand::Like);
        assert_eq!(parse_command("/download"), ReplCommand::Download);
        assert_eq!(parse_command("/have"), ReplCommand::Have);
        assert_eq!(parse_command("/plating"), ReplCommand::Plating);
        assert_eq!(parse_command("/instore"), ReplCommand::InStore);
        assert_eq!(
            parse_command("/bogus"),
            ReplCommand::Unknown("/bogus".to_string())
        );
    }

    #[test]
    fn test_photo_keeps_raw_labels() {
        assert_eq!(
            parse_command("/photo tomato, Cutting board"),
            ReplCommand::Photo("tomato, Cutting board".to_string())
        );
    }

    #[test]
    fn test_save_with_and_without_path() {
        assert_eq!(parse_command("/save"), ReplCommand::Save(None));
        assert_eq!(
            parse_command("/save  dinner.txt"),
            ReplCommand::Save(Some(PathBuf::from("dinner.txt")))
        );
    }

    #[test]
    fn test_recipe_file_name() {
        let card = RecipeCard {
            name: "Masala Omelette (Quick)".to_string(),
            serves: "2".to_string(),
            ingredients: Vec::new(),
            steps: Vec::new(),
        };
        assert_eq!(recipe_file_name(&card), "Masala_Omelette_Quick.txt");

        let unnamed = RecipeCard {
            name: "!!".to_string(),
            ..card
        };
        assert_eq!(recipe_file_name(&unnamed), "recipe.txt");
    }
}
