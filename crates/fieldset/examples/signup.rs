// A signup form driven headlessly: install rules, simulate the user
// editing fields, forward the change/submit events, print what the page
// would show.

use fieldset::{Event, Form, FormData, FormDocument};

fn print_errors(form: &Form<FormData>) {
    for field in form.document().field_names() {
        match form.errors().first_message(&field) {
            Some(message) => println!("  {field}: {message}"),
            None => println!("  {field}: ok"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let data: FormData = [
        ("email", ""),
        ("password", ""),
        ("confirmPassword", ""),
        ("age", ""),
    ]
    .into_iter()
    .collect();

    let mut form = Form::new(data);
    form.install_json(
        r#"{
            "email": [
                {"type": "required", "message": "Email is required"},
                {"type": "regex", "message": "Not an email address", "value": "^.+@.+$"}
            ],
            "password": [
                {"type": "required", "message": "Pick a password"},
                {"type": "minlen", "message": "At least 8 characters", "value": 8}
            ],
            "confirmPassword": [
                {"type": "sameAs", "message": "Passwords do not match", "value": "password"}
            ],
            "age": [
                {"type": "integer", "message": "Age must be a number"},
                {"type": "min", "message": "You must be 18 or older", "value": 18}
            ]
        }"#,
    )
    .expect("rule mapping is well-formed");

    println!("submitting the empty form:");
    let verdict = form.handle(Event::Submit);
    println!("  submit allowed: {}", !verdict.is_prevented());
    print_errors(&form);

    println!("\nuser fills the form, one change event at a time:");
    for (field, value) in [
        ("email", "ada@example.com"),
        ("password", "correct horse"),
        ("confirmPassword", "correct horse"),
        ("age", "36"),
    ] {
        form.document_mut().put_single(field, value);
        let verdict = form.handle(Event::Change { field });
        println!("  {field} -> {value:?} (ok: {})", !verdict.is_prevented());
    }

    println!("\nsubmitting again:");
    let verdict = form.handle(Event::Submit);
    println!("  submit allowed: {}", !verdict.is_prevented());
    print_errors(&form);
}
