use crate::catalog::NavLink;
use crate::utils::*;
use std::rc::Rc;
use twelvedays_core::{SpoilerGate, SpoilerPolicy};
use yew::prelude::*;

pub(crate) enum Msg {
    Clicked(usize),
    Confirm,
    Dismiss,
}

#[derive(Properties, PartialEq)]
pub(crate) struct SpoilerLinksProps {
    pub links: Rc<Vec<NavLink>>,
    pub policy: SpoilerPolicy,
}

/// Navigation that puts a confirmation dialog in front of spoiler pages.
pub(crate) struct SpoilerLinks {
    gate: SpoilerGate<LocalStore>,
    pending: Option<usize>,
}

impl SpoilerLinks {
    fn view_confirm(&self, ctx: &Context<Self>, link: &NavLink) -> Html {
        let on_backdrop = ctx.link().batch_callback(|e: MouseEvent| {
            is_backdrop_click(&e).then_some(Msg::Dismiss)
        });
        let on_yes = ctx.link().callback(|_: MouseEvent| Msg::Confirm);
        let on_no = ctx.link().callback(|_: MouseEvent| Msg::Dismiss);

        html! {
            <Modal>
                <div class="modal confirm" aria-hidden="false" onclick={on_backdrop}>
                    <article role="alertdialog" aria-modal="true">
                        <h2>{link.confirm_title().to_string()}</h2>
                        <p>{link.confirm_message().to_string()}</p>
                        <nav>
                            <button class="confirm-yes" onclick={on_yes}>{"Continue"}</button>
                            <button class="confirm-no" onclick={on_no}>{"Stay here"}</button>
                        </nav>
                    </article>
                </div>
            </Modal>
        }
    }
}

impl Component for SpoilerLinks {
    type Message = Msg;
    type Properties = SpoilerLinksProps;

    fn create(ctx: &Context<Self>) -> Self {
        Self {
            gate: SpoilerGate::new(ctx.props().policy, LocalStore),
            pending: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        let links = &ctx.props().links;
        match msg {
            Msg::Clicked(index) => {
                let Some(link) = links.get(index) else {
                    return false;
                };
                match link.spoiler {
                    Some(level) if self.gate.needs_confirmation(level) => {
                        log::debug!("asking before {:?} spoiler {}", level, link.href);
                        self.pending = Some(index);
                        true
                    }
                    _ => {
                        navigate_to(&link.href);
                        false
                    }
                }
            }
            Msg::Confirm => {
                let Some(link) = self.pending.take().and_then(|index| links.get(index)) else {
                    return false;
                };
                if let Some(level) = link.spoiler {
                    self.gate.acknowledge(level);
                }
                navigate_to(&link.href);
                true
            }
            Msg::Dismiss => self.pending.take().is_some(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let links = &ctx.props().links;
        let pending = self.pending.and_then(|index| links.get(index));

        html! {
            <nav class="site-links">
                {
                    for links.iter().enumerate().map(|(index, link)| {
                        let onclick = ctx.link().callback(move |e: MouseEvent| {
                            e.prevent_default();
                            Msg::Clicked(index)
                        });
                        html! {
                            <a
                                href={link.href.clone()}
                                class={classes!(link.spoiler.is_some().then_some("spoiler"))}
                                {onclick}
                            >
                                {link.title.clone()}
                            </a>
                        }
                    })
                }
                if let Some(link) = pending {
                    {self.view_confirm(ctx, link)}
                }
            </nav>
        }
    }
}
