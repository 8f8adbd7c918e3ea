//! Faq command - canned answers from the help desk

use anyhow::Result;
use colored::Colorize;

use crate::output;

struct Faq {
    question: &'static str,
    answer: &'static str,
}

const FAQS: &[Faq] = &[
    Faq {
        question: "What is my account balance?",
        answer: "Choose 'Account details' in the banking menu.",
    },
    Faq {
        question: "How do I transfer funds?",
        answer: "Choose 'Transfer funds' in the banking menu.",
    },
    Faq {
        question: "What should I do if my account is locked?",
        answer: "Ask an operator to run `tally unlock <account>`.",
    },
    Faq {
        question: "How can I reset my PIN?",
        answer: "Visit your nearest branch to reset your PIN.",
    },
    Faq {
        question: "Why was I asked for a passcode?",
        answer: "With two-factor enabled, every correct PIN is followed by a one-time passcode.",
    },
];

/// First answer whose question contains `query`, ignoring case
pub fn answer(query: &str) -> Option<&'static str> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    FAQS.iter()
        .find(|faq| faq.question.to_lowercase().contains(&query))
        .map(|faq| faq.answer)
}

/// All known questions, for prompting
pub fn questions() -> impl Iterator<Item = &'static str> {
    FAQS.iter().map(|faq| faq.question)
}

pub fn run(question: &str) -> Result<()> {
    match answer(question) {
        Some(text) => println!("{} {}", "Answer:".bold(), text),
        None => {
            output::warning("Sorry, I don't understand your question. Try one of:");
            for q in questions() {
                println!("  - {}", q);
            }
        }
    }
    Ok(())
}
