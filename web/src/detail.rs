use crate::utils::{Modal, is_backdrop_click};
use twelvedays_core::DetailFragment;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct DetailProps {
    /// Content to show, the modal is hidden while this is `None`.
    pub detail: Option<DetailFragment>,
    pub on_close: Callback<()>,
}

#[function_component(DetailView)]
pub(crate) fn detail_view(props: &DetailProps) -> Html {
    let Some(detail) = props.detail.clone() else {
        return html! {};
    };

    let on_backdrop = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            if is_backdrop_click(&e) {
                on_close.emit(());
            }
        })
    };
    let on_button = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <Modal>
            <div class="modal detail" aria-hidden="false" onclick={on_backdrop}>
                <article role="dialog" aria-modal="true">
                    <button class="modal-close" aria-label="Close" onclick={on_button}>{"×"}</button>
                    <h2>{detail.title.clone()}</h2>
                    if let Some(src) = &detail.image {
                        <img src={src.clone()} alt={detail.name.clone()}/>
                    }
                    <h3>{detail.name.clone()}</h3>
                    if !detail.description.is_empty() {
                        <p>{detail.description.clone()}</p>
                    }
                    if let Some(href) = &detail.link {
                        <a href={href.clone()}>{"More about this bottle"}</a>
                    }
                </article>
            </div>
        </Modal>
    }
}
