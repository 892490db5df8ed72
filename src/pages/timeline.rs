use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use log::{error, info};

use super::{Fetch, parse_id};
use crate::api::{TimelineEvent, fetch_timeline};
use crate::components::layout::Sidebar;
use crate::config::ApiConfig;

/// Life events of one story, alternating left and right of a center line.
#[component]
pub fn TimelinePage() -> impl IntoView {
	let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_default());
	let params = use_params_map();
	let story_id = Memo::new(move |_| parse_id(params.with(|p| p.get("id"))));
	let events = RwSignal::new(Fetch::<Vec<TimelineEvent>>::Loading);

	Effect::new(move |_| {
		let Some(id) = story_id.get() else {
			events.set(Fetch::Failed);
			return;
		};
		events.set(Fetch::Loading);
		let config = config.get_value();
		spawn_local(async move {
			match fetch_timeline(&config, id).await {
				Ok(list) => {
					info!("loaded {} event(s) for story {id}", list.len());
					events.set(Fetch::Ready(list));
				}
				Err(e) => {
					error!("Failed to fetch timeline {id}: {e}");
					events.set(Fetch::Failed);
				}
			}
		});
	});

	view! {
		<Sidebar>
			<div class="page timeline-page">
				<h1 class="page-title timeline-title">"Life Timeline"</h1>
				{move || match events.get() {
					Fetch::Loading => view! { <p class="muted">"Loading..."</p> }.into_any(),
					Fetch::Failed => {
						view! { <p class="form-error">"Failed to fetch timeline."</p> }.into_any()
					}
					Fetch::Ready(list) => {
						view! {
							<ol class="timeline">
								{list
									.into_iter()
									.enumerate()
									.map(|(i, evt)| view! { <TimelineEntry evt=evt left={i % 2 == 0} /> })
									.collect_view()}
								<li class="timeline-end">"Present Day"</li>
							</ol>
						}
							.into_any()
					}
				}}
			</div>
		</Sidebar>
	}
}

#[component]
fn TimelineEntry(evt: TimelineEvent, left: bool) -> impl IntoView {
	let side = if left { "timeline-item left" } else { "timeline-item right" };
	view! {
		<li class=side>
			{evt.year.map(|year| view! { <span class="year-badge">{year}</span> })}
			<div class="timeline-card">
				<h3>{evt.event.unwrap_or_default()}</h3>
				{evt.title.map(|title| view! { <h4>{title}</h4> })}
				{evt.description.map(|text| view! { <p>{text}</p> })}
				{evt.location.map(|place| view! { <p class="card-meta">{place}</p> })}
			</div>
		</li>
	}
}
