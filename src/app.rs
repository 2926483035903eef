//! TaskFlow Frontend App
//!
//! Screen switch (login, signup, dashboard) and the chat-to-task-list bridge.

use chrono::Local;
use futures::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::debug;

use crate::components::{ChatPanel, LoginForm, NavBar, SignupForm, TaskListView};
use crate::context::{AppContext, Page};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    // Every tasks-changed event from the assistant becomes one task reload
    let mut changes = ctx.events().subscribe();
    spawn_local(async move {
        while changes.next().await.is_some() {
            debug!("assistant changed tasks, reloading");
            ctx.reload();
        }
    });

    view! {
        {move || match ctx.page.get() {
            Page::Login { registered } => view! {
                <AuthLayout title="Welcome back" subtitle="Sign in to continue to your tasks">
                    <LoginForm registered=registered />
                </AuthLayout>
            }.into_any(),
            Page::Signup => view! {
                <AuthLayout title="Create your account" subtitle="Start organizing with TaskFlow">
                    <SignupForm />
                </AuthLayout>
            }.into_any(),
            Page::Dashboard => view! { <Dashboard /> }.into_any(),
        }}
    }
}

#[component]
fn AuthLayout(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="auth-layout">
            <div class="auth-card">
                <div class="auth-brand">
                    <span class="navbar-logo">"✓"</span>
                    <span class="navbar-title">"TaskFlow"</span>
                </div>
                <h1>{title}</h1>
                <p class="auth-subtitle">{subtitle}</p>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn Dashboard() -> impl IntoView {
    let today = Local::now().format("%A, %B %-d").to_string();

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">
                <header class="dashboard-header">
                    <h1>"My Tasks"</h1>
                    <p class="dashboard-date">{today}</p>
                </header>
                <TaskListView />
            </main>
            <ChatPanel />
        </div>
    }
}
