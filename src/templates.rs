//! askama page templates.

use askama::Template;

use crate::models::{Choice, Poll};

pub const NO_CHOICE_MESSAGE: &str = "You didn't select a choice.";

#[derive(Template)]
#[template(path = "polls/index.html")]
pub struct IndexTemplate {
    pub latest_poll_list: Vec<Poll>,
}

#[derive(Template)]
#[template(path = "polls/detail.html")]
pub struct DetailTemplate<'a> {
    pub poll: &'a Poll,
    pub choices: &'a [Choice],
    pub error_message: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "polls/results.html")]
pub struct ResultsTemplate<'a> {
    pub poll: &'a Poll,
    pub choices: &'a [Choice],
}

#[derive(Template)]
#[template(path = "404.html")]
pub struct NotFoundTemplate;
