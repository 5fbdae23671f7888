use crate::utils::LocalStore;
use gloo::timers::callback::Timeout;
use hashbrown::HashMap;
use std::rc::Rc;
use twelvedays_core::{
    Bottle, CardId, Catalog, GuessOutcome, GuessRange, MatchGame, ScratchError,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

const CELEBRATION_MS: u32 = 2500;

pub(crate) enum Msg {
    Input(CardId, String),
    Submit(CardId),
    CelebrationDone,
}

#[derive(Properties, PartialEq)]
pub(crate) struct MatchPanelProps {
    pub catalog: Rc<Catalog>,
    pub range: GuessRange,
}

fn feedback(result: &Result<GuessOutcome, ScratchError>) -> String {
    match result {
        Ok(GuessOutcome::Matched) => "Matched!".to_string(),
        Ok(GuessOutcome::Missed) => "Not quite, try another day.".to_string(),
        Ok(GuessOutcome::AlreadyMatched) => "Already matched.".to_string(),
        Err(ScratchError::NotANumber) => "Enter a day number.".to_string(),
        Err(err) => err.to_string(),
    }
}

/// Guess which day each bottle belongs to.
pub(crate) struct MatchPanel {
    game: MatchGame<LocalStore>,
    inputs: HashMap<CardId, String>,
    messages: HashMap<CardId, String>,
    celebrating: Option<CardId>,
    celebration_timer: Option<Timeout>,
}

impl MatchPanel {
    fn view_row(&self, ctx: &Context<Self>, bottle: &Bottle) -> Html {
        let id = bottle.id();
        let range = self.game.range();
        let matched = self.game.is_matched(&id);
        let value = self.inputs.get(&id).cloned().unwrap_or_default();

        let oninput = {
            let id = id.clone();
            ctx.link().callback(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                Msg::Input(id.clone(), input.value())
            })
        };
        let onsubmit = {
            let id = id.clone();
            ctx.link().callback(move |e: SubmitEvent| {
                e.prevent_default();
                Msg::Submit(id.clone())
            })
        };

        let class = classes!(
            "match-row",
            matched.then_some("matched"),
            (self.celebrating.as_ref() == Some(&id)).then_some("celebrate")
        );

        html! {
            <li key={id.as_str().to_string()} {class}>
                <span class="bottle-name">{bottle.name.clone()}</span>
                if matched {
                    <span class="bottle-day">{format!("Day {}", bottle.day)}</span>
                } else {
                    <form {onsubmit}>
                        <input
                            type="number"
                            min={range.min.to_string()}
                            max={range.max.to_string()}
                            {value}
                            {oninput}
                        />
                        <button type="submit">{"Guess"}</button>
                    </form>
                }
                if let Some(message) = self.messages.get(&id) {
                    <small class="feedback" aria-live="polite">{message.clone()}</small>
                }
            </li>
        }
    }
}

impl Component for MatchPanel {
    type Message = Msg;
    type Properties = MatchPanelProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        Self {
            game: MatchGame::new(LocalStore, props.range, props.catalog.answers()),
            inputs: HashMap::new(),
            messages: HashMap::new(),
            celebrating: None,
            celebration_timer: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(id, value) => {
                self.messages.remove(&id);
                self.inputs.insert(id, value);
                true
            }
            Msg::Submit(id) => {
                let input = self.inputs.get(&id).map(String::as_str).unwrap_or("");
                let result = self.game.guess(&id, input);
                log::debug!("guess for {}: {:?}", id, result);
                if result == Ok(GuessOutcome::Matched) {
                    self.inputs.remove(&id);
                    self.celebrating = Some(id.clone());
                    let link = ctx.link().clone();
                    self.celebration_timer = Some(Timeout::new(CELEBRATION_MS, move || {
                        link.send_message(Msg::CelebrationDone)
                    }));
                }
                self.messages.insert(id, feedback(&result));
                true
            }
            Msg::CelebrationDone => {
                self.celebration_timer = None;
                self.celebrating.take().is_some()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let catalog = &ctx.props().catalog;
        let total = catalog.bottles().len();
        let matched = self.game.matched_count();

        html! {
            <section class={classes!("match-game", (matched == total).then_some("complete"))}>
                <h2>{"Match the bottles"}</h2>
                <p class="match-score">{format!("{} of {} matched", matched, total)}</p>
                <ol>
                    { for catalog.bottles().iter().map(|bottle| self.view_row(ctx, bottle)) }
                </ol>
            </section>
        }
    }
}
