use crate::api::SaveNoteRequest;
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, Input, Label, Select, Spinner, Textarea,
};
use crate::state::AppContext;
use icons::{LogOut, Pencil, Plus, Trash2};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Shown inline for any failed login attempt, network or credential.
pub(crate) const LOGIN_ERROR_MESSAGE: &str = "Invalid CIN or password. Please try again.";

fn log_error(msg: String) {
    web_sys::console::error_1(&msg.into());
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let cin: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);

    let state = expect_context::<AppContext>().0;

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let cin_val = cin.get();
        let password_val = password.get();
        let mut client = state.api_client.get_untracked();

        loading.set(true);

        spawn_local(async move {
            match client.login(&cin_val, &password_val).await {
                Ok(response) => {
                    client.set_token(response.token);
                    client.save_to_storage();
                    state.login_error.set(None);
                    // Flipping the client signal switches to the logged-in
                    // view, which fetches notes and users on mount.
                    state.api_client.set(client);
                }
                Err(e) => {
                    log_error(format!("Login error: {e}"));
                    state.login_error.set(Some(LOGIN_ERROR_MESSAGE.to_string()));
                }
            }
            loading.set(false);
        });
    };

    view! {
        <div class="mx-auto mt-16 w-full max-w-sm">
            <Card>
                <CardHeader>
                    <CardTitle class="text-lg">"Login"</CardTitle>
                </CardHeader>

                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_submit>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="cin" class="text-xs">"CIN"</Label>
                            <Input id="cin" bind_value=cin required=true class="h-8 text-sm" />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password" class="text-xs">"Password"</Label>
                            <Input
                                id="password"
                                r#type="password"
                                placeholder="••••••••"
                                bind_value=password
                                required=true
                                class="h-8 text-sm"
                            />
                        </div>

                        <Show when=move || state.login_error.get().is_some() fallback=|| ().into_view()>
                            {move || {
                                state.login_error.get().map(|e| {
                                    view! {
                                        <Alert class="border-destructive/30">
                                            <AlertDescription class="text-destructive text-xs">
                                                {e}
                                            </AlertDescription>
                                        </Alert>
                                    }
                                })
                            }}
                        </Show>

                        <Button
                            class="w-full"
                            size=ButtonSize::Sm
                            attr:disabled=move || loading.get()
                        >
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {move || if loading.get() { "Signing in..." } else { "Login" }}
                            </span>
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let state = expect_context::<AppContext>().0;

    let load_notes = move || {
        let client = state.api_client.get_untracked();
        spawn_local(async move {
            match client.fetch_notes().await {
                Ok(notes) => state.notes.set(notes),
                // Keep whatever list we had; failures are developer-facing only.
                Err(e) => log_error(format!("Error fetching notes: {e}")),
            }
        });
    };

    let load_users = move || {
        let client = state.api_client.get_untracked();
        spawn_local(async move {
            match client.fetch_users().await {
                Ok(users) => state.users.set(users),
                Err(e) => log_error(format!("Error fetching users: {e}")),
            }
        });
    };

    Effect::new(move |_| {
        load_notes();
        load_users();
    });

    // No in-flight guard here: a double click issues two writes, matching
    // the original contract.
    let on_save = move |_| {
        let dialog = state.dialog.get_untracked();
        let req = SaveNoteRequest::new(
            &state.draft_title.get_untracked(),
            &state.draft_content.get_untracked(),
            &state.draft_user_id.get_untracked(),
        );
        let client = state.api_client.get_untracked();

        spawn_local(async move {
            let saved = match dialog.editing_id() {
                Some(id) => client.update_note(id, &req).await.map(|_| ()),
                None => client.create_note(&req).await.map(|_| ()),
            };

            match saved {
                Ok(()) => {
                    // Reload the whole list rather than patching the cache.
                    match client.fetch_notes().await {
                        Ok(notes) => state.notes.set(notes),
                        Err(e) => log_error(format!("Error fetching notes: {e}")),
                    }
                    state.close_dialog();
                }
                Err(e) => {
                    // Dialog stays open with the draft intact.
                    log_error(format!("Error saving note: {e}"));
                }
            }
        });
    };

    let on_delete = move |id: String| {
        let client = state.api_client.get_untracked();
        spawn_local(async move {
            match client.delete_note(&id).await {
                Ok(()) => state.remove_note(&id),
                Err(e) => log_error(format!("Error deleting note: {e}")),
            }
        });
    };

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <h1 class="text-xl font-semibold">"Your Notes"</h1>
                <Button size=ButtonSize::Sm on:click=move |_| state.open_add_dialog()>
                    <Plus />
                    "Add Note"
                </Button>
            </div>

            <Show
                when=move || !state.notes.get().is_empty()
                fallback=|| view! { <div class="text-sm text-muted-foreground">"No notes available."</div> }
            >
                <Card class="py-0">
                    <CardContent class="p-0">
                        <table class="w-full text-sm">
                            <thead>
                                <tr class="border-b text-left text-muted-foreground">
                                    <th class="px-4 py-3 font-medium">"Title"</th>
                                    <th class="px-4 py-3 font-medium">"Content"</th>
                                    <th class="px-4 py-3 font-medium">"Assigned User"</th>
                                    <th class="px-4 py-3 font-medium">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    state
                                        .notes
                                        .get()
                                        .into_iter()
                                        .map(|note| {
                                            let assignee = note.assignee_label();
                                            let note_for_edit = note.clone();
                                            let id_for_delete = note.id.clone();

                                            view! {
                                                <tr class="border-b last:border-0">
                                                    <td class="px-4 py-3">{note.title.clone()}</td>
                                                    <td class="px-4 py-3">{note.content.clone()}</td>
                                                    <td class="px-4 py-3">{assignee}</td>
                                                    <td class="px-4 py-2">
                                                        <div class="flex items-center gap-1">
                                                            <Button
                                                                variant=ButtonVariant::Ghost
                                                                size=ButtonSize::Icon
                                                                attr:title="Edit"
                                                                on:click=move |_| state.open_edit_dialog(&note_for_edit)
                                                            >
                                                                <Pencil />
                                                            </Button>
                                                            <Button
                                                                variant=ButtonVariant::Ghost
                                                                size=ButtonSize::Icon
                                                                class="text-destructive"
                                                                attr:title="Delete"
                                                                on:click=move |_| on_delete(id_for_delete.clone())
                                                            >
                                                                <Trash2 />
                                                            </Button>
                                                        </div>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </CardContent>
                </Card>
            </Show>

            <Show when=move || state.dialog.get().is_open() fallback=|| ().into_view()>
                <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4">
                    <div class="w-full max-w-sm rounded-md border border-border bg-background p-4 shadow-lg">
                        <div class="mb-3 text-sm font-medium">
                            {move || state.dialog.get().title()}
                        </div>

                        <div class="space-y-2">
                            <div class="space-y-1">
                                <Label html_for="note_title" class="text-xs">"Title"</Label>
                                <Input
                                    id="note_title"
                                    bind_value=state.draft_title
                                    class="h-8 text-sm"
                                />
                            </div>

                            <div class="space-y-1">
                                <Label html_for="note_content" class="text-xs">"Content"</Label>
                                <Textarea
                                    id="note_content"
                                    bind_value=state.draft_content
                                    class="text-sm"
                                />
                            </div>

                            <div class="space-y-1">
                                <Label html_for="note_assignee" class="text-xs">"Assign to User"</Label>
                                <Select id="note_assignee" bind_value=state.draft_user_id class="h-8">
                                    <option value="">"None"</option>
                                    {move || {
                                        state
                                            .users
                                            .get()
                                            .into_iter()
                                            .map(|u| {
                                                view! {
                                                    <option value=u.id.clone()>{u.full_name()}</option>
                                                }
                                            })
                                            .collect_view()
                                    }}
                                </Select>
                            </div>

                            <div class="flex items-center justify-end gap-2 pt-2">
                                <Button
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    on:click=move |_| state.close_dialog()
                                >
                                    "Cancel"
                                </Button>
                                <Button size=ButtonSize::Sm on:click=on_save>
                                    "Save"
                                </Button>
                            </div>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
pub fn RootPage() -> impl IntoView {
    let state = expect_context::<AppContext>().0;
    let is_authenticated = move || state.api_client.get().is_authenticated();

    let on_logout = move |_| {
        let mut client = state.api_client.get_untracked();
        client.logout();
        state.api_client.set(client);
    };

    view! {
        <div class="min-h-screen bg-background">
            <header class="bg-primary text-primary-foreground">
                <div class="mx-auto flex h-14 w-full max-w-[960px] items-center justify-between px-4">
                    <div class="text-sm font-semibold">"Notes App"</div>
                    <Show when=is_authenticated fallback=|| ().into_view()>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Sm
                            class="text-primary-foreground"
                            on:click=on_logout
                        >
                            <LogOut />
                            "Logout"
                        </Button>
                    </Show>
                </div>
            </header>

            <main class="mx-auto w-full max-w-[960px] px-4 py-8">
                <Show when=is_authenticated fallback=move || view! { <LoginPage /> }>
                    <NotesPage />
                </Show>
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_message_text() {
        // Part of the UI contract, same as the wire shapes.
        assert_eq!(
            LOGIN_ERROR_MESSAGE,
            "Invalid CIN or password. Please try again."
        );
    }
}
