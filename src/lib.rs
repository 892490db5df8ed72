//! VirsaAI family tree editor and story browser: Leptos client-side app
//! wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
pub mod api;
pub mod components;
pub mod config;
mod pages;

// Top-Level pages
use crate::config::ApiConfig;
use crate::pages::dashboard::DashboardPage;
use crate::pages::family::FamilyPage;
use crate::pages::not_found::NotFound;
use crate::pages::record::RecordPage;
use crate::pages::story::StoryPage;
use crate::pages::story_library::StoryLibraryPage;
use crate::pages::timeline::TimelinePage;
use crate::pages::timeline_home::TimelineHomePage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the family tree, the story and timeline
/// pages, and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = ApiConfig::from_build_env();
	info!("backend at {}", config.root());
	provide_context(config);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="VirsaAI" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=FamilyPage />
				<Route path=path!("/family") view=FamilyPage />
				<Route path=path!("/dashboard") view=DashboardPage />
				<Route path=path!("/record") view=RecordPage />
				<Route path=path!("/story_library") view=StoryLibraryPage />
				<Route path=path!("/story/:id") view=StoryPage />
				<Route path=path!("/timeline_home") view=TimelineHomePage />
				<Route path=path!("/timeline/:id") view=TimelinePage />
			</Routes>
		</Router>
	}
}
