use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_snapshot_writes_properties_per_language() -> Result<()> {
    let test = CliTest::with_file(
        "uixml/input/ENG/order.xml",
        "<ORDER><TITLE>Order</TITLE><BUTTON_LBL>Submit</BUTTON_LBL><NAME_LBL>Name</NAME_LBL></ORDER>",
    )?;
    test.write_file(
        "uixml/input/CHS/order.xml",
        "<ORDER><TITLE>订单</TITLE></ORDER>",
    )?;

    let (code, stdout, _) = run(test.snapshot_command())?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Wrote 2 snapshots with 3 labels"));
    assert_eq!(
        test.read_file("properties/ENG/order.properties")?,
        "#order labels (ENG)\nORDER.BUTTON_LBL=Submit\nORDER.TITLE=Order\n"
    );
    assert_eq!(
        test.read_file("properties/CHS/order.properties")?,
        "#order labels (CHS)\nORDER.TITLE=\\u8BA2\\u5355\n"
    );
    // Snapshots never touch the input documents.
    assert!(test.read_file("uixml/input/ENG/order.xml")?.contains("Submit"));

    Ok(())
}

#[test]
fn test_snapshot_rejects_non_utf8_document() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir_all(test.root().join("uixml/input/CHT"))?;
    std::fs::write(
        test.root().join("uixml/input/CHT/order.xml"),
        b"<ORDER><TITLE>\xAD\xD7</TITLE></ORDER>",
    )?;

    let (code, stdout, _) = run(test.snapshot_command())?;

    assert_eq!(code, 1);
    assert!(stdout.contains("CHT document is not valid UTF-8"));
    assert!(!test.exists("properties/CHT/order.properties"));

    Ok(())
}
