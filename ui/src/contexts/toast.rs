use std::rc::Rc;
use uuid::Uuid;
use yew::prelude::*;

/// Auto-dismiss delay for toasts.
pub const TOAST_DURATION_MS: u32 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            kind,
        }
    }
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
}

pub enum ToastAction {
    Add(Toast),
    Remove(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Add(toast) => toasts.push(toast),
            ToastAction::Remove(id) => toasts.retain(|toast| toast.id != id),
        }
        Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let toast_state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={toast_state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn add(&self, toast: Toast) {
        let toast_id = toast.id;
        self.context.dispatch(ToastAction::Add(toast));

        let context = self.context.clone();
        yew::platform::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            context.dispatch(ToastAction::Remove(toast_id));
        });
    }

    pub fn error(&self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastKind::Error));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.add(Toast::new(message, ToastKind::Success));
    }

    pub fn remove(&self, id: Uuid) {
        self.context.dispatch(ToastAction::Remove(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_keep_insertion_order_and_remove_by_id() {
        let first = Toast::new("Deleted", ToastKind::Success);
        let second = Toast::new("Invalid admin passcode", ToastKind::Error);
        let state = Rc::new(ToastState::default())
            .reduce(ToastAction::Add(first.clone()))
            .reduce(ToastAction::Add(second.clone()));
        assert_eq!(state.toasts, vec![first.clone(), second.clone()]);

        let state = state.reduce(ToastAction::Remove(first.id));
        assert_eq!(state.toasts, vec![second]);
    }
}
