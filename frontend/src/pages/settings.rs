//! 个人设置：资料、通知偏好、安全（修改密码）

use estatecrm::controller::{Notices, StateCell, submit_form};
use estatecrm_shared::forms::{PasswordChangeForm, ProfileForm};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos::web_sys::SubmitEvent;
use tracing::info;

use crate::auth::use_auth;
use crate::components::fields::{Checkbox, TextField};
use crate::components::layout::DashboardLayout;
use crate::components::ui::{Card, NoticeStack};
use crate::hooks::FormBinding;
use crate::web::SignalCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Profile,
    Notifications,
    Security,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Profile, Tab::Notifications, Tab::Security];

    fn label(&self) -> &'static str {
        match self {
            Tab::Profile => "Profile",
            Tab::Notifications => "Notifications",
            Tab::Security => "Security",
        }
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let tab = RwSignal::new(Tab::Profile);
    let notices = SignalCell::new(Notices::default());
    let dismiss = Callback::new(move |id| notices.signal().update(|n| n.dismiss(id)));

    let tabs = Tab::ALL
        .into_iter()
        .map(|t| view! {
            <a role="tab" class=move || if tab.get() == t { "tab tab-active" } else { "tab" } on:click=move |_| tab.set(t)>
                {t.label()}
            </a>
        })
        .collect_view();

    view! {
        <DashboardLayout title="Settings">
            <NoticeStack notices=notices.signal() on_dismiss=dismiss />
            <div role="tablist" class="tabs tabs-boxed">{tabs}</div>
            {move || match tab.get() {
                Tab::Profile => view! { <ProfileTab notices=notices /> }.into_any(),
                Tab::Notifications => view! { <NotificationsTab /> }.into_any(),
                Tab::Security => view! { <SecurityTab notices=notices /> }.into_any(),
            }}
        </DashboardLayout>
    }
}

#[component]
fn ProfileTab(notices: SignalCell<Notices>) -> impl IntoView {
    let auth = use_auth();
    let api = auth.api.clone();
    let initial = auth
        .session
        .with_untracked(|s| s.user().map(ProfileForm::from_user))
        .unwrap_or_default();
    let form = FormBinding::new(initial);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, ProfileForm::validate, |update| async move {
                api.auth().save_profile(&update).await
            })
            .await;
            if let Some(Ok(user)) = sent {
                info!(user_id = user.id, "profile updated");
                form.replace(ProfileForm::from_user(&user));
                notices.with_mut(|n| n.success("Profile updated successfully"));
            }
        });
    };

    let failure = form.failure();
    let submitting = form.submitting();

    view! {
        <Card title="Profile Information">
            <form on:submit=on_submit class="space-y-2 max-w-xl">
                {move || failure.get().map(|msg| view! {
                    <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                })}
                <TextField label="Full Name" value=form.text(|f| f.name.clone())
                    on_input=form.input("name", |f, v| f.name = v) error=form.error("name") />
                <TextField label="Email" input_type="email" value=form.text(|f| f.email.clone())
                    on_input=form.input("email", |f, v| f.email = v) error=form.error("email") />
                <TextField label="Phone" input_type="tel" value=form.text(|f| f.phone.clone())
                    on_input=form.input("phone", |f, v| f.phone = v) />
                <div class="pt-4">
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Saving..." } else { "Save Profile" }}
                    </button>
                </div>
            </form>
        </Card>
    }
}

/// 通知偏好只保存在页面内
#[component]
fn NotificationsTab() -> impl IntoView {
    const PREFERENCES: [(&str, bool); 5] = [
        ("Email notifications", true),
        ("SMS notifications", false),
        ("New lead assigned", true),
        ("Follow-up reminders", true),
        ("Weekly performance report", false),
    ];

    let toggles = PREFERENCES
        .into_iter()
        .map(|(label, on)| {
            let enabled = RwSignal::new(on);
            view! { <Checkbox label=label checked=enabled on_toggle=Callback::new(move |v| enabled.set(v)) /> }
        })
        .collect_view();

    view! {
        <Card title="Notification Preferences">
            <div class="space-y-1">{toggles}</div>
        </Card>
    }
}

#[component]
fn SecurityTab(notices: SignalCell<Notices>) -> impl IntoView {
    let api = use_auth().api;
    let form = FormBinding::new(PasswordChangeForm::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = api.clone();
        spawn_local(async move {
            let cell = form.cell();
            let sent = submit_form(&cell, PasswordChangeForm::validate, |change| async move {
                api.auth().change_password(&change).await
            })
            .await;
            if let Some(Ok(_)) = sent {
                info!("password changed");
                form.replace(PasswordChangeForm::default());
                notices.with_mut(|n| n.success("Password changed successfully"));
            }
        });
    };

    let failure = form.failure();
    let submitting = form.submitting();

    view! {
        <Card title="Change Password">
            <form on:submit=on_submit class="space-y-2 max-w-xl">
                {move || failure.get().map(|msg| view! {
                    <div role="alert" class="alert alert-error text-sm py-2"><span>{msg}</span></div>
                })}
                <TextField label="Current Password" input_type="password" value=form.text(|f| f.current_password.clone())
                    on_input=form.input("currentPassword", |f, v| f.current_password = v) error=form.error("currentPassword") />
                <TextField label="New Password" input_type="password" value=form.text(|f| f.new_password.clone())
                    on_input=form.input("newPassword", |f, v| f.new_password = v) error=form.error("newPassword") />
                <TextField label="Confirm New Password" input_type="password" value=form.text(|f| f.confirm_password.clone())
                    on_input=form.input("confirmPassword", |f, v| f.confirm_password = v) error=form.error("confirmPassword") />
                <div class="pt-4">
                    <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Updating..." } else { "Update Password" }}
                    </button>
                </div>
            </form>
        </Card>
    }
}
