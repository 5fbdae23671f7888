use crate::board::BoardView;
use crate::catalog::NavLink;
use crate::matching::MatchPanel;
use crate::spoiler::SpoilerLinks;
use std::rc::Rc;
use twelvedays_core::{Catalog, ScratchConfig};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct AppProps {
    pub config: ScratchConfig,
    pub catalog: Rc<Catalog>,
    pub links: Rc<Vec<NavLink>>,
}

#[function_component]
pub(crate) fn App(props: &AppProps) -> Html {
    let AppProps {
        config,
        catalog,
        links,
    } = props;

    html! {
        <main class="twelvedays">
            <header>
                <h1>{"12 Days of Bourbon"}</h1>
                <SpoilerLinks links={links.clone()} policy={config.spoiler_policy}/>
            </header>
            <BoardView config={*config} catalog={catalog.clone()}/>
            <MatchPanel catalog={catalog.clone()} range={config.guess_range}/>
        </main>
    }
}
