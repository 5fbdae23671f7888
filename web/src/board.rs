use crate::canvas::CanvasSurface;
use crate::detail::DetailView;
use crate::input::{PointerPhase, StrokeInput, pointer_input};
use crate::utils::*;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use hashbrown::HashMap;
use std::rc::Rc;
use twelvedays_core::{BoardEvent, Bottle, Card, CardId, Catalog, ScratchBoard, ScratchConfig};
use web_sys::{HtmlCanvasElement, PointerEvent};
use yew::prelude::*;

pub(crate) enum Msg {
    Stroke {
        id: CardId,
        pointer: i32,
        input: StrokeInput,
    },
    SurfacesReady,
    Resized,
    ApplyResize,
    OpenDetail(CardId),
    CloseDetail,
    Reset,
}

#[derive(Properties, PartialEq)]
pub(crate) struct BoardProps {
    pub config: ScratchConfig,
    pub catalog: Rc<Catalog>,
}

/// Node refs of one card: the element that sets the size and the canvas laid over it.
#[derive(Default)]
struct CardRefs {
    card: NodeRef,
    canvas: NodeRef,
}

pub(crate) struct BoardView {
    board: ScratchBoard<CanvasSurface, LocalStore>,
    refs: HashMap<CardId, CardRefs>,
    /// Card and pointer of the stroke in progress; other pointers are ignored meanwhile.
    active: Option<(CardId, i32)>,
    detail: Option<CardId>,
    resize_timer: Option<Timeout>,
    _resize_listener: EventListener,
}

impl BoardView {
    fn attach_surfaces(&mut self) -> bool {
        let ratio = device_pixel_ratio();
        let mut attached = false;
        for (id, refs) in &self.refs {
            if self.board.is_revealed(id) {
                continue;
            }
            let Some(canvas) = refs.canvas.cast::<HtmlCanvasElement>() else {
                log::warn!("card {} has no canvas mounted", id);
                continue;
            };
            let Some(display) = element_size(&refs.card) else {
                continue;
            };
            let result = CanvasSurface::new(canvas)
                .and_then(|surface| self.board.attach_surface(id, surface, display, ratio));
            match result {
                Ok(()) => attached = true,
                Err(err) => log::error!("card {} stays covered: {}", id, err),
            }
        }
        log::debug!("surfaces attached at device pixel ratio {}", ratio);
        attached
    }

    fn stroke(&mut self, id: CardId, pointer: i32, input: StrokeInput) -> Option<BoardEvent> {
        let owns_stroke = self
            .active
            .as_ref()
            .is_some_and(|(active_id, active_pointer)| *active_id == id && *active_pointer == pointer);
        match input {
            StrokeInput::Start(point) => {
                if self.active.is_some() {
                    return None;
                }
                self.active = Some((id.clone(), pointer));
                self.board.stroke_start(&id, point)
            }
            StrokeInput::Move(point) if owns_stroke => self.board.stroke_move(&id, point),
            StrokeInput::End if owns_stroke => {
                self.active = None;
                self.board.stroke_end(&id)
            }
            StrokeInput::Cancel if owns_stroke => {
                self.active = None;
                self.board.stroke_cancel(&id)
            }
            StrokeInput::Move(_) | StrokeInput::End | StrokeInput::Cancel => None,
        }
    }

    fn pointer_callback(
        ctx: &Context<Self>,
        id: &CardId,
        phase: PointerPhase,
    ) -> Callback<PointerEvent> {
        let id = id.clone();
        ctx.link().batch_callback(move |e: PointerEvent| {
            pointer_input(phase, &e).map(|input| Msg::Stroke {
                id: id.clone(),
                pointer: e.pointer_id(),
                input,
            })
        })
    }

    fn view_card(&self, ctx: &Context<Self>, bottle: &Bottle, card: &Card<CanvasSurface>) -> Html {
        let id = card.id().clone();
        let refs = &self.refs[&id];
        let revealed = card.is_revealed();
        // covered but without a working surface, css keeps the content hidden
        let inert = !revealed && !card.is_interactive();

        let onclick = {
            let id = id.clone();
            ctx.link()
                .batch_callback(move |_: MouseEvent| revealed.then(|| Msg::OpenDetail(id.clone())))
        };
        let style = bottle
            .image
            .as_ref()
            .map(|src| format!("background-image: url('{}')", src));

        html! {
            <li
                key={id.as_str().to_string()}
                class={classes!("card", revealed.then_some("revealed"), inert.then_some("inert"))}
                data-day={bottle.day.to_string()}
                ref={refs.card.clone()}
                {style}
                {onclick}
            >
                <div class="content">
                    <span class="day">{bottle.day.to_string()}</span>
                    <h3>{bottle.name.clone()}</h3>
                </div>
                if !revealed {
                    <canvas
                        class="scratch"
                        ref={refs.canvas.clone()}
                        onpointerdown={Self::pointer_callback(ctx, &id, PointerPhase::Down)}
                        onpointermove={Self::pointer_callback(ctx, &id, PointerPhase::Move)}
                        onpointerup={Self::pointer_callback(ctx, &id, PointerPhase::Up)}
                        onpointercancel={Self::pointer_callback(ctx, &id, PointerPhase::Cancel)}
                        onlostpointercapture={Self::pointer_callback(ctx, &id, PointerPhase::Cancel)}
                    />
                }
            </li>
        }
    }
}

impl Component for BoardView {
    type Message = Msg;
    type Properties = BoardProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let board = ScratchBoard::new(props.config, LocalStore, props.catalog.ids());
        let refs = props
            .catalog
            .ids()
            .map(|id| (id, CardRefs::default()))
            .collect();

        let link = ctx.link().clone();
        let resize_listener = EventListener::new(&gloo::utils::window(), "resize", move |_| {
            link.send_message(Msg::Resized)
        });

        log::info!(
            "{} cards, {} already revealed",
            props.catalog.bottles().len(),
            board.progress().len()
        );

        Self {
            board,
            refs,
            active: None,
            detail: None,
            resize_timer: None,
            _resize_listener: resize_listener,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Stroke { id, pointer, input } => match self.stroke(id, pointer, input) {
                Some(BoardEvent::Revealed(id)) => {
                    log::info!("card {} revealed", id);
                    self.active = None;
                    self.detail = Some(id);
                    true
                }
                None => false,
            },
            Msg::SurfacesReady => true,
            Msg::Resized => {
                let link = ctx.link().clone();
                // dropping the previous timeout cancels it
                self.resize_timer = Some(Timeout::new(
                    self.board.config().resize_debounce_ms,
                    move || link.send_message(Msg::ApplyResize),
                ));
                false
            }
            Msg::ApplyResize => {
                self.resize_timer = None;
                let refs = &self.refs;
                let resized = self
                    .board
                    .resize_all(|id| refs.get(id).and_then(|refs| element_size(&refs.card)));
                log::debug!("{} covers redrawn after resize", resized);
                // interrupted strokes were finished by the resize
                self.active = None;
                false
            }
            Msg::OpenDetail(id) => {
                if self.detail.as_ref() == Some(&id) {
                    return false;
                }
                self.detail = Some(id);
                true
            }
            Msg::CloseDetail => self.detail.take().is_some(),
            Msg::Reset => {
                if let Err(err) = self.board.reset_progress() {
                    log::error!("progress could not be fully cleared: {}", err);
                }
                log::info!("progress cleared, reloading");
                reload_page();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let catalog = &ctx.props().catalog;
        let detail = self
            .detail
            .as_ref()
            .and_then(|id| catalog.get(id))
            .map(Bottle::detail);
        let on_close = ctx.link().callback(|_: ()| Msg::CloseDetail);
        let on_reset = ctx.link().callback(|_: MouseEvent| Msg::Reset);

        html! {
            <section class="scratch-board">
                <ol class="cards">
                    {
                        for self.board.cards().filter_map(|card| {
                            let bottle = catalog.get(card.id())?;
                            Some(self.view_card(ctx, bottle, card))
                        })
                    }
                </ol>
                <button class="reset" onclick={on_reset}>{"Reset progress"}</button>
                <DetailView {detail} {on_close}/>
            </section>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && self.attach_surfaces() {
            ctx.link().send_message(Msg::SurfacesReady);
        }
    }
}
