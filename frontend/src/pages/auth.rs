//! 公开页面：登录、注册、找回密码
//!
//! 登录成功后不需要手动导航，路由服务监听认证状态并自动重定向。

use estatecrm::controller::submit_form;
use estatecrm::route::AppRoute;
use estatecrm_shared::forms::{ForgotPasswordForm, LoginForm, RegisterForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;
use tracing::info;

use crate::auth::use_auth;
use crate::components::fields::TextField;
use crate::hooks::FormBinding;
use crate::web::router::{Link, use_router};

/// 公开页面的外框
#[component]
fn AuthShell(#[prop(into)] title: String, #[prop(into)] subtitle: String, children: Children) -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{title}</h1>
                    <p class="text-base-content/70">{subtitle}</p>
                </div>
                <div class="card shrink-0 w-full shadow-2xl bg-base-100">{children()}</div>
            </div>
        </div>
    }
}

#[component]
fn FailureAlert(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    view! {
        {move || message.get().map(|msg| view! {
            <div role="alert" class="alert alert-error text-sm py-2">
                <span>{msg}</span>
            </div>
        })}
    }
}

#[component]
fn SubmitButton(#[prop(into)] busy: Signal<bool>, label: &'static str, busy_label: &'static str) -> impl IntoView {
    view! {
        <div class="form-control mt-6">
            <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                {move || if busy.get() {
                    view! { <span class="loading loading-spinner"></span> {busy_label} }.into_any()
                } else {
                    label.into_any()
                }}
            </button>
        </div>
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_auth().api;
    let form = FormBinding::new(LoginForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, LoginForm::validate, |request| async move {
                api.auth().sign_in(&request).await
            })
            .await;
            if let Some(Ok(user)) = sent {
                info!(user_id = user.id, "login complete");
            }
        });
    };

    view! {
        <AuthShell title="EstateCRM" subtitle="Sign in to your account">
            <form class="card-body" on:submit=on_submit>
                <FailureAlert message=form.failure() />
                <TextField
                    label="Email"
                    input_type="email"
                    placeholder="you@company.com"
                    value=form.text(|f| f.email.clone())
                    on_input=form.input("email", |f, v| f.email = v)
                    error=form.error("email")
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value=form.text(|f| f.password.clone())
                    on_input=form.input("password", |f, v| f.password = v)
                    error=form.error("password")
                />
                <div class="flex justify-end text-sm mt-2">
                    <Link to=AppRoute::ForgotPassword.to_path() class="link link-hover">"Forgot password?"</Link>
                </div>
                <SubmitButton busy=form.submitting() label="Sign In" busy_label="Signing in..." />
                <p class="text-center text-sm mt-4">
                    "Don't have an account? "
                    <Link to=AppRoute::Register.to_path() class="link link-primary">"Register"</Link>
                </p>
            </form>
        </AuthShell>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = use_auth().api;
    let router = use_router();
    let form = FormBinding::new(RegisterForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, RegisterForm::validate, |request| async move {
                api.auth().register(&request).await
            })
            .await;
            if let Some(Ok(_)) = sent {
                info!("registration complete");
                router.go(AppRoute::Login);
            }
        });
    };

    view! {
        <AuthShell title="Create Account" subtitle="Register a new EstateCRM user">
            <form class="card-body" on:submit=on_submit>
                <FailureAlert message=form.failure() />
                <TextField
                    label="Full Name"
                    value=form.text(|f| f.name.clone())
                    on_input=form.input("name", |f, v| f.name = v)
                    error=form.error("name")
                />
                <TextField
                    label="Email"
                    input_type="email"
                    value=form.text(|f| f.email.clone())
                    on_input=form.input("email", |f, v| f.email = v)
                    error=form.error("email")
                />
                <TextField
                    label="Password"
                    input_type="password"
                    value=form.text(|f| f.password.clone())
                    on_input=form.input("newPassword", |f, v| f.password = v)
                    error=form.error("newPassword")
                />
                <TextField
                    label="Confirm Password"
                    input_type="password"
                    value=form.text(|f| f.confirm_password.clone())
                    on_input=form.input("confirmPassword", |f, v| f.confirm_password = v)
                    error=form.error("confirmPassword")
                />
                <SubmitButton busy=form.submitting() label="Register" busy_label="Creating account..." />
                <p class="text-center text-sm mt-4">
                    "Already registered? "
                    <Link to=AppRoute::Login.to_path() class="link link-primary">"Sign in"</Link>
                </p>
            </form>
        </AuthShell>
    }
}

/// 后端没有找回密码接口，校验通过后只显示提示
#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let form = FormBinding::new(ForgotPasswordForm::default());
    let (sent_to, set_sent_to) = signal(Option::<String>::None);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let email = form
            .cell()
            .signal()
            .try_update(|s| {
                let email = s.begin_submit(ForgotPasswordForm::validate);
                s.submitting = false;
                email
            })
            .flatten();
        if email.is_some() {
            set_sent_to.set(email);
        }
    };

    view! {
        <AuthShell title="Reset Password" subtitle="We will email you a reset link">
            <form class="card-body" on:submit=on_submit>
                {move || sent_to.get().map(|email| view! {
                    <div class="alert alert-success text-sm py-2">
                        {format!("If an account exists for {email}, a reset link is on its way.")}
                    </div>
                })}
                <TextField
                    label="Email"
                    input_type="email"
                    value=form.text(|f| f.email.clone())
                    on_input=form.input("email", |f, v| f.email = v)
                    error=form.error("email")
                />
                <SubmitButton busy=form.submitting() label="Send Reset Link" busy_label="Sending..." />
                <p class="text-center text-sm mt-4">
                    <Link to=AppRoute::Login.to_path() class="link link-primary">"Back to sign in"</Link>
                </p>
            </form>
        </AuthShell>
    }
}
