//! Root component and routes

use leptos::prelude::*;
use leptos_router::{
    components::{Route, Router, Routes, A},
    path,
};

use crate::components::{DebugPanel, Footer, Navbar};
use crate::pages::DeployPage;
use crate::state::provide_app_context;

#[component]
pub fn App() -> impl IntoView {
    let ctx = provide_app_context();
    ctx.restore();
    on_cleanup(move || ctx.teardown());

    view! {
        <Router>
            <div class="app-container">
                <Navbar/>
                <Routes fallback=|| view! { <NotFound/> }>
                    <Route path=path!("/") view=DeployPage/>
                </Routes>
                <Footer/>
                <DebugPanel/>
            </div>
        </Router>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="card" style="max-width: 500px; margin: 48px auto; text-align: center;">
            <h1 style="margin-bottom: 16px; font-size: 32px; font-weight: 700;">"404 - Page Not Found"</h1>
            <p style="margin-bottom: 24px;">"The page you're looking for doesn't exist."</p>
            <A href="/">
                <span class="btn">"Go to Deployer"</span>
            </A>
        </div>
    }
}
