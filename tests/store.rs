use rust_xlsxwriter::Workbook;

use pe_tracker_lib::{
    funds_with_interactions, import_workbook, save_import, Db, ImportConfig, Interaction, Repository,
};

fn tracker_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Targets").unwrap();
    for (c, header) in ["Fundo", "Ticket", "Setores"].iter().enumerate() {
        sheet.write_string(0, c as u16, *header).unwrap();
    }
    for (c, value) in ["Pátria", "R$ 150-500mi", "Saúde"].iter().enumerate() {
        sheet.write_string(1, c as u16, *value).unwrap();
    }
    workbook.save_to_buffer().unwrap()
}

#[test]
fn snapshot_survives_reopening_the_file() {
    let dir = std::env::temp_dir().join(format!("pe-tracker-store-{}", std::process::id()));
    let path = dir.join("nested").join("pe_tracker.db");
    let report = import_workbook(&tracker_workbook(), &ImportConfig::default()).unwrap();

    {
        let db = Db::new(path.clone()).unwrap();
        save_import(&db, &report).unwrap();
    }
    let reopened = Db::new(path.clone()).unwrap();
    let data = reopened.load().unwrap().unwrap();
    assert_eq!(data.funds, report.funds);
    assert_eq!(data.file_name, None);

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn reimport_keeps_logged_interactions_and_overlay_is_non_mutating() {
    let db = Db::open_in_memory().unwrap();
    let report = import_workbook(&tracker_workbook(), &ImportConfig::default()).unwrap();
    let mut data = save_import(&db, &report).unwrap();

    data.interactions.push(Interaction {
        id: "i-1".to_string(),
        fund_id: "fundo-1".to_string(),
        date: "12/03/2025".to_string(),
        participants: vec!["Ana".to_string()],
        summary: "03/25: agora ticket R$ 50-100mi e controle. 01/25: ticket R$ 150-500mi".to_string(),
        criteria: None,
    });
    db.save(&data).unwrap();

    let data = save_import(&db, &report).unwrap();
    assert_eq!(data.interactions.len(), 1);

    let shown = funds_with_interactions(&data);
    assert_eq!(shown[0].ticket_size.as_deref(), Some("R$ 50-100mi"));
    assert_eq!(shown[0].ideal_deal_type.as_deref(), Some("Controle"));
    assert_eq!(data.funds[0].ticket_size.as_deref(), Some("R$ 150-500mi"));

    db.clear().unwrap();
    assert!(db.load().unwrap().is_none());
}
