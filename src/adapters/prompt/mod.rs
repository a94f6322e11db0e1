pub mod terminal_selector;
