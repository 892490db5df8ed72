use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_params_map;
use log::{error, info, warn};

use super::{Fetch, date_label, parse_id};
use crate::api::{Story, fetch_story};
use crate::components::layout::Sidebar;
use crate::config::ApiConfig;

/// One biography, read-only, with links to its timeline and the recorder.
#[component]
pub fn StoryPage() -> impl IntoView {
	let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_default());
	let params = use_params_map();
	let story_id = Memo::new(move |_| parse_id(params.with(|p| p.get("id"))));
	let story = RwSignal::new(Fetch::<Option<Story>>::Loading);

	Effect::new(move |_| {
		let Some(id) = story_id.get() else {
			warn!("story route without a numeric id");
			story.set(Fetch::Ready(None));
			return;
		};
		story.set(Fetch::Loading);
		let config = config.get_value();
		spawn_local(async move {
			match fetch_story(&config, id).await {
				Ok(found) => {
					info!("loaded story {id}");
					story.set(Fetch::Ready(found));
				}
				Err(e) => {
					error!("Failed to fetch story {id}: {e}");
					story.set(Fetch::Failed);
				}
			}
		});
	});

	view! {
		<Sidebar>
			<div class="page story-page">
				{move || match story.get() {
					Fetch::Loading => view! { <p class="muted">"Loading story..."</p> }.into_any(),
					Fetch::Failed => {
						view! { <p class="form-error">"Failed to load this story."</p> }.into_any()
					}
					Fetch::Ready(None) => view! { <p class="muted">"Story not found."</p> }.into_any(),
					Fetch::Ready(Some(story)) => view! { <StoryView story=story /> }.into_any(),
				}}
			</div>
		</Sidebar>
	}
}

#[component]
fn StoryView(story: Story) -> impl IntoView {
	let paragraphs: Vec<String> = story.paragraphs().into_iter().map(str::to_owned).collect();
	view! {
		<h1 class="page-title">{story.display_name().to_owned()}</h1>
		<p class="page-subtitle">"A documented personal history"</p>
		<div class="story-actions">
			<a class="button-secondary" href="/record">
				"Record Audio"
			</a>
			<a class="button-secondary" href=format!("/timeline/{}", story.timeline_id())>
				"View Timeline"
			</a>
		</div>
		<article class="story-article">
			{paragraphs.into_iter().map(|p| view! { <p>{p}</p> }).collect_view()}
		</article>
		<p class="card-meta story-updated">
			"Last updated: " {date_label(story.updated_at.as_deref())}
		</p>
	}
}
