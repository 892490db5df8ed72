use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use super::{date_label, name_matches};
use crate::api::{StorySummary, fetch_story_library};
use crate::components::layout::Sidebar;
use crate::config::ApiConfig;

/// Searchable grid of every generated story.
#[component]
pub fn StoryLibraryPage() -> impl IntoView {
	let config = use_context::<ApiConfig>().unwrap_or_default();
	let stories = RwSignal::new(Vec::<StorySummary>::new());
	let search = RwSignal::new(String::new());

	spawn_local(async move {
		match fetch_story_library(&config).await {
			Ok(list) => {
				info!("loaded {} stories", list.len());
				stories.set(list);
			}
			Err(e) => error!("Failed to fetch story library: {e}"),
		}
	});

	let visible = Memo::new(move |_| {
		let query = search.get();
		stories.with(|all| {
			all.iter()
				.filter(|s| name_matches(s.display_name(), &query))
				.cloned()
				.collect::<Vec<_>>()
		})
	});

	view! {
		<Sidebar>
			<div class="page">
				<h1 class="page-title">"Story Library"</h1>
				<input
					class="search"
					type="text"
					placeholder="Search by name..."
					prop:value=move || search.get()
					on:input=move |ev| search.set(event_target_value(&ev))
				/>
				<div class="card-grid">
					<For
						each=move || visible.get()
						key=|story| story.id
						children=move |story| {
							view! {
								<a class="story-card" href=format!("/story/{}", story.id)>
									<h2>{story.display_name().to_owned()}</h2>
									<p class="story-summary">
										{story.summary.clone().unwrap_or_else(|| "No summary available.".into())}
									</p>
									<span class="chip">{format!("{} chars", story.char_count())}</span>
									<p class="card-meta">
										"Last updated: " {date_label(story.created_at.as_deref())}
									</p>
								</a>
							}
						}
					/>
				</div>
				<Show when=move || visible.with(Vec::is_empty)>
					<p class="muted empty">"No stories found."</p>
				</Show>
			</div>
		</Sidebar>
	}
}
