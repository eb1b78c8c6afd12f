/// Main application entry point for EduFinder.
/// Wires the auth and toast contexts, the navigation bar and the page routes.
use crate::components::navigation::Navigation;
use crate::components::toast::{provide_toasts, Toaster};
use crate::pages::colleges::CollegesPage;
use crate::pages::favorites::FavoritesPage;
use crate::pages::home::{HomePage, NotFound};
use crate::pages::logout::LogoutPage;
use crate::pages::reviews::ReviewsPage;
use crate::pages::signin::SignInPage;
use crate::session::provide_auth;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    provide_auth();
    provide_toasts();

    view! {
        <Stylesheet id="leptos" href="/pkg/edufinder.css"/>
        <Title text="EduFinder"/>
        <Router>
            <Navigation/>
            <main class="container">
                <Routes>
                    <Route path="/" view=HomePage/>
                    <Route path="/colleges" view=CollegesPage/>
                    <Route path="/reviews" view=ReviewsPage/>
                    <Route path="/favorites" view=FavoritesPage/>
                    <Route path="/signin" view=SignInPage/>
                    <Route path="/logout" view=LogoutPage/>
                    <Route path="/*any" view=NotFound/>
                </Routes>
            </main>
            <Toaster/>
        </Router>
    }
}
