//! 表单控件，统一渲染字段错误

use estatecrm_shared::models::OptionItem;
use leptos::prelude::*;

#[component]
fn FieldError(#[prop(into)] error: MaybeProp<String>) -> impl IntoView {
    view! {
        {move || error.get().map(|msg| view! {
            <label class="label">
                <span class="label-text-alt text-error">{msg}</span>
            </label>
        })}
    }
}

#[component]
pub fn TextField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=input_type
                placeholder=placeholder
                class=move || if error.get().is_some() { "input input-bordered input-error" } else { "input input-bordered" }
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
            <FieldError error=error />
        </div>
    }
}

#[component]
pub fn TextAreaField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    #[prop(optional, into)] error: MaybeProp<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <textarea
                class="textarea textarea-bordered h-24"
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            ></textarea>
            <FieldError error=error />
        </div>
    }
}

/// 下拉选择；`options` 为 (值, 显示文本)
#[component]
pub fn SelectField(
    #[prop(into)] label: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] options: Signal<Vec<(String, String)>>,
    on_change: Callback<String>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <select
                class="select select-bordered"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                {placeholder.map(|p| view! { <option value="">{p}</option> })}
                {move || {
                    let current = value.get();
                    options
                        .get()
                        .into_iter()
                        .map(|(v, text)| {
                            let selected = v == current;
                            view! { <option value=v selected=selected>{text}</option> }
                        })
                        .collect_view()
                }}
            </select>
            <FieldError error=error />
        </div>
    }
}

#[component]
pub fn Checkbox(#[prop(into)] label: String, #[prop(into)] checked: Signal<bool>, on_toggle: Callback<bool>) -> impl IntoView {
    view! {
        <label class="label cursor-pointer justify-start gap-3">
            <input
                type="checkbox"
                class="checkbox checkbox-primary"
                prop:checked=move || checked.get()
                on:change=move |ev| on_toggle.run(event_target_checked(&ev))
            />
            <span class="label-text">{label}</span>
        </label>
    }
}

/// 下拉选项：值为 id
pub fn id_options(items: Vec<OptionItem>) -> Vec<(String, String)> {
    items.into_iter().map(|o| (o.id.to_string(), o.name)).collect()
}

/// 以名称本身作为提交值
pub fn name_options(names: Vec<String>) -> Vec<(String, String)> {
    names.into_iter().map(|n| (n.clone(), n)).collect()
}
