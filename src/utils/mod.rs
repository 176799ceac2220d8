pub mod strings;
pub mod tokenizer;
