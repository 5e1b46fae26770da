mod barber_dashboard;
mod dashboard;
mod home;
mod landing;
mod login;
mod not_found;
mod signup;

pub(crate) use barber_dashboard::BarberDashboardPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use home::HomePage;
pub(crate) use landing::LandingPage;
pub(crate) use login::LoginPage;
pub(crate) use not_found::RedirectHome;
pub(crate) use signup::SignUpPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

/// Route paths shared by guards, navigation, and the router table.
pub(crate) mod paths {
    pub const ROOT: &str = "/";
    pub const HOME: &str = "/home";
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const DASHBOARD: &str = "/dashboard";
    pub const BARBER_DASHBOARD: &str = "/barber/dashboard";
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <RedirectHome /> }>
            <Route path=path!("/") view=LandingPage />
            <Route path=path!("/home") view=HomePage />
            <Route path=path!("/login") view=LoginPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/barber/dashboard") view=BarberDashboardPage />
        </Routes>
    }
}
