mod support;

mod audio {
    mod capture;
    mod encoder;
    mod recorder;
}

mod model {
    mod deck;
    mod session_log;
}

mod practice {
    mod machine;
    mod selection;
    mod timer;
}

mod store {
    mod question_csv;
    mod deck_repository;
    mod json_file_store;
    mod practice_days;
    mod session_log_store;
    mod settings_store;
}
