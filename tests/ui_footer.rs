use laws_repo_viewer::ui::tui::footer_legend;

#[test]
fn footer_legend_toggles_help() {
    let hidden = footer_legend(false);
    assert!(
        hidden.contains("F1 help"),
        "hidden footer should show F1 help"
    );
    assert!(
        hidden.contains("F6 export"),
        "hidden footer should show F6 export"
    );
    assert!(
        hidden.contains("Esc/F10 quit"),
        "hidden footer should show Esc/F10 quit"
    );

    let shown = footer_legend(true);
    assert!(
        shown.contains("Esc/F10 quit"),
        "shown footer should show Esc/F10 quit"
    );
    assert!(
        shown.contains("F9 print html"),
        "shown footer should mention the print action"
    );
}
