use leptos::prelude::*;

use crate::components::layout::Sidebar;

const SECTIONS: [(&str, &str, &str, &str); 3] = [
	(
		"Record a New Story",
		"Upload or record audio and let VirsaAI transcribe and transform it.",
		"/record",
		"Start Recording",
	),
	(
		"Story Library",
		"Browse all the biographies and stories you've created.",
		"/story_library",
		"View Stories",
	),
	(
		"Family Tree",
		"Explore connections across generations and add new members.",
		"/family",
		"View Tree",
	),
];

/// Landing overview with a card per main section.
#[component]
pub fn DashboardPage() -> impl IntoView {
	view! {
		<Sidebar>
			<div class="page">
				<h1 class="page-title">"Dashboard"</h1>
				<div class="card-grid">
					{SECTIONS
						.into_iter()
						.map(|(title, blurb, href, action)| {
							view! {
								<div class="person-card">
									<h3>{title}</h3>
									<p class="card-meta">{blurb}</p>
									<a class="button-primary" href=href>
										{action}
									</a>
								</div>
							}
						})
						.collect_view()}
				</div>
			</div>
		</Sidebar>
	}
}
