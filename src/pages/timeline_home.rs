use std::cmp::Reverse;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{error, info};

use super::{date_label, name_matches};
use crate::api::{Person, fetch_people};
use crate::components::layout::Sidebar;
use crate::config::ApiConfig;

/// Sort choices of the people grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PeopleOrder {
	/// Most recently updated first.
	#[default]
	Recent,
	AToZ,
	ZToA,
	MostEvents,
}

impl PeopleOrder {
	pub const ALL: [PeopleOrder; 4] = [Self::Recent, Self::AToZ, Self::ZToA, Self::MostEvents];

	pub fn label(self) -> &'static str {
		match self {
			Self::Recent => "Sort by Recent",
			Self::AToZ => "A–Z",
			Self::ZToA => "Z–A",
			Self::MostEvents => "Most Stories",
		}
	}

	pub fn from_label(label: &str) -> Self {
		Self::ALL.into_iter().find(|o| o.label() == label).unwrap_or_default()
	}

	/// Stable sort; ties keep the backend's order.
	pub fn sort(self, people: &mut [Person]) {
		match self {
			// ISO timestamps order lexically; missing ones go last.
			Self::Recent => people.sort_by(|a, b| b.updated_at.cmp(&a.updated_at)),
			Self::AToZ => people.sort_by_key(|p| p.display_name().to_lowercase()),
			Self::ZToA => people.sort_by_key(|p| Reverse(p.display_name().to_lowercase())),
			Self::MostEvents => people.sort_by_key(|p| Reverse(p.event_count)),
		}
	}
}

/// Everyone with a timeline, searchable and sortable.
#[component]
pub fn TimelineHomePage() -> impl IntoView {
	let config = use_context::<ApiConfig>().unwrap_or_default();
	let people = RwSignal::new(Vec::<Person>::new());
	let search = RwSignal::new(String::new());
	let order = RwSignal::new(PeopleOrder::default());

	spawn_local(async move {
		match fetch_people(&config).await {
			Ok(list) => {
				info!("loaded {} timeline(s)", list.len());
				people.set(list);
			}
			Err(e) => error!("Failed to fetch people: {e}"),
		}
	});

	let visible = Memo::new(move |_| {
		let query = search.get();
		let mut list: Vec<Person> = people.with(|all| {
			all.iter()
				.filter(|p| name_matches(p.display_name(), &query))
				.cloned()
				.collect()
		});
		order.get().sort(&mut list);
		list
	});

	view! {
		<Sidebar>
			<div class="page">
				<h1 class="page-title">"Family Timelines"</h1>
				<p class="page-subtitle">
					"Each family member has one timeline that grows with their stories."
				</p>
				<div class="toolbar">
					<input
						class="search"
						placeholder="Search people..."
						prop:value=move || search.get()
						on:input=move |ev| search.set(event_target_value(&ev))
					/>
					<select on:change=move |ev| order.set(PeopleOrder::from_label(&event_target_value(&ev)))>
						{PeopleOrder::ALL
							.into_iter()
							.map(|o| view! { <option value={o.label()}>{o.label()}</option> })
							.collect_view()}
					</select>
				</div>
				<div class="card-grid">
					<a class="add-person" href="/family">
						"+ Add New Person"
					</a>
					<For
						each=move || visible.get()
						key=|person| person.story_id
						children=move |person| {
							view! {
								<div class="person-card">
									<h3>{person.display_name().to_owned()}</h3>
									<p class="card-meta">
										{format!(
											"{} events • Updated {}",
											person.event_count,
											date_label(person.updated_at.as_deref()),
										)}
									</p>
									<a class="button-primary" href=format!("/timeline/{}", person.story_id)>
										"View Timeline"
									</a>
								</div>
							}
						}
					/>
				</div>
			</div>
		</Sidebar>
	}
}
