use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info};

use crate::api::{Member, fetch_family};
use crate::components::add_member::AddMemberModal;
use crate::components::family_graph::FamilyGraphCanvas;
use crate::components::layout::Sidebar;
use crate::config::ApiConfig;

/// Family tree page: loads the member directory, shows the editable tree and
/// hosts the add-member flow.
#[component]
pub fn FamilyPage() -> impl IntoView {
	let config = StoredValue::new(use_context::<ApiConfig>().unwrap_or_default());
	let members = RwSignal::new(Vec::<Member>::new());
	let loading = RwSignal::new(true);
	let show_add = RwSignal::new(false);
	let empty = Memo::new(move |_| members.with(Vec::is_empty));

	// Full refetch; a failed load shows an empty tree rather than an error.
	let load = move || {
		loading.set(true);
		let config = config.get_value();
		spawn_local(async move {
			match fetch_family(&config).await {
				Ok(list) => {
					info!("loaded {} family member(s)", list.len());
					members.set(list);
				}
				Err(e) => {
					error!("Failed to fetch family: {e}");
					members.set(Vec::new());
				}
			}
			loading.set(false);
		});
	};
	load();

	let on_created = Callback::new(move |id: i64| {
		debug!("member {id} created, reloading directory");
		load();
	});
	let on_close = Callback::new(move |_: ()| show_add.set(false));

	view! {
		<Sidebar>
			<div class="family-page">
				<header class="family-header">
					<div>
						<h1>"Family Tree"</h1>
						<p class="subtitle">"Automatically builds as your stories grow."</p>
						<p class="tip">
							"Tip: drag from the bottom handle of one card to another card to "
							"create a connection. If two parents are connected to the same "
							"child, the app will group them automatically. Select an edge or "
							"card and press Delete to remove it (not saved)."
						</p>
					</div>
					<button class="button-primary" on:click=move |_| show_add.set(true)>
						"+ Add Member"
					</button>
				</header>

				<section class="family-panel">
					{move || {
						if loading.get() {
							view! { <p class="muted">"Loading..."</p> }.into_any()
						} else if empty.get() {
							view! { <p class="muted">"No family members yet."</p> }.into_any()
						} else {
							view! { <FamilyGraphCanvas members=members /> }.into_any()
						}
					}}
				</section>

				<AddMemberModal open=show_add on_close=on_close on_created=on_created />
			</div>
		</Sidebar>
	}
}
