use std::time::{Duration, Instant};

use xss_sanitizer::{SanitizeOptions, Sanitizer, Value};

fn sanitize(html: &str) -> String {
    let sanitizer = Sanitizer::new();
    let value = Value::from(html);
    let sanitized = sanitizer.sanitize(&value, &SanitizeOptions::default());
    sanitized
        .as_str()
        .map(String::from)
        .unwrap_or_else(|| panic!("expected a string for {:?}", html))
}

// Vectors from the OWASP XSS Filter Evasion Cheat Sheet

#[test]
fn test_xss_locator() {
    assert_eq!(
        sanitize(r#"';alert(String.fromCharCode(88,83,83))//';alert(String.fromCharCode(88,83,83))//";alert(String.fromCharCode(88,83,83))//"alert(String.fromCharCode(88,83,83))//--></SCRIPT>">'><SCRIPT>alert(String.fromCharCode(88,83,83))</SCRIPT>"#),
        r#"';alert(String.fromCharCode(88,83,83))//';alert(String.fromCharCode(88,83,83))//";alert(String.fromCharCode(88,83,83))//"alert(String.fromCharCode(88,83,83))//--&gt;&lt;/SCRIPT&gt;"&gt;'&gt;&lt;SCRIPT&gt;alert(String.fromCharCode(88,83,83))&lt;/SCRIPT&gt;"#
    );
}

#[test]
fn test_xss_locator_short() {
    assert_eq!(
        sanitize(r#"'';!--"<XSS>=&{()}"#),
        r#"'';!--"&lt;XSS&gt;=&{()}"#
    );
}

#[test]
fn test_no_filter_evasion() {
    assert_eq!(
        sanitize("<SCRIPT SRC=http://xss.rocks/xss.js></SCRIPT>"),
        "&lt;SCRIPT SRC=http://xss.rocks/xss.js&gt;&lt;/SCRIPT&gt;"
    );
}

#[test]
fn test_filter_bypass_based_polyglot() {
    assert_eq!(
        sanitize(r#"'">><marquee><img src=x onerror=confirm(1)></marquee>"></plaintext></|><plaintext/onmouseover=prompt(1)><script>prompt(1)</script>@gmail.com<isindex formaction=javascript:alert(/XSS/) type=submit>'-->"></script><script>alert(document.cookie)</script>"><img/id="confirm&lpar;1)"/alt="/"src="/"onerror=eval(id)>'"><img src="http://www.shellypalmer.com/wp-content/images/2015/07/hacked-compressor.jpg">"#),
        r#"'"&gt;&gt;&lt;marquee&gt;<img src>&lt;/marquee&gt;"&gt;&lt;/plaintext&gt;&lt;/|&gt;&lt;plaintext/onmouseover=prompt(1)&gt;&lt;script&gt;prompt(1)&lt;/script&gt;@gmail.com&lt;isindex formaction=javascript:alert(/XSS/) type=submit&gt;'--&gt;"&gt;&lt;/script&gt;&lt;script&gt;alert(document.cookie)&lt;/script&gt;"&gt;&lt;img/id="confirm&lpar;1)"/alt="/"src="/"onerror=eval(id)&gt;'"&gt;<img src="http://www.shellypalmer.com/wp-content/images/2015/07/hacked-compressor.jpg">"#
    );
}

#[test]
fn test_image_xss_using_the_javascript_directive() {
    assert_eq!(
        sanitize(r#"<IMG SRC="javascript:alert('XSS');">"#),
        "<img src>"
    );
}

#[test]
fn test_no_quotes_and_no_semicolon() {
    assert_eq!(
        sanitize("<IMG SRC=javascript:alert('XSS')>"),
        "<img src>"
    );
}

#[test]
fn test_case_insensitive_xss_attack_vector() {
    assert_eq!(
        sanitize("<IMG SRC=JaVaScRiPt:alert('XSS')>"),
        "<img src>"
    );
}

#[test]
fn test_html_entities() {
    assert_eq!(
        sanitize("<IMG SRC=javascript:alert(&quot;XSS&quot;)>"),
        "<img src>"
    );
}

#[test]
fn test_grave_accent_obfuscation() {
    assert_eq!(
        sanitize(r#"<IMG SRC=`javascript:alert("RSnake says, 'XSS'")`>"#),
        "<img src>"
    );
}

#[test]
fn test_malformed_a_tags() {
    assert_eq!(
        sanitize(r#"<a onmouseover="alert(document.cookie)">xxs link</a>"#),
        "<a>xxs link</a>"
    );
    assert_eq!(
        sanitize("<a onmouseover=alert(document.cookie)>xxs link</a>"),
        "<a>xxs link</a>"
    );
}

#[test]
fn test_malformed_img_tags() {
    assert_eq!(
        sanitize(r#"<IMG """><SCRIPT>alert("XSS")</SCRIPT>">"#),
        r#"<img>&lt;SCRIPT&gt;alert("XSS")&lt;/SCRIPT&gt;"&gt;"#
    );
}

#[test]
fn test_fromcharcode() {
    assert_eq!(
        sanitize("<IMG SRC=javascript:alert(String.fromCharCode(88,83,83))>"),
        "<img src>"
    );
}

#[test]
fn test_default_src_tag_to_get_past_filters_that_check_src_domain() {
    assert_eq!(
        sanitize(r#"<IMG SRC=# onmouseover="alert('xxs')">"#),
        "<img src=\"#\">"
    );
}

#[test]
fn test_default_src_tag_by_leaving_it_empty() {
    assert_eq!(
        sanitize(r#"<IMG SRC= onmouseover="alert('xxs')">"#),
        "<img src>"
    );
}

#[test]
fn test_default_src_tag_by_leaving_it_out_entirely() {
    assert_eq!(
        sanitize(r#"<IMG onmouseover="alert('xxs')">"#),
        "<img>"
    );
}

#[test]
fn test_on_error_alert() {
    assert_eq!(
        sanitize(r#"<IMG SRC=/ onerror="alert(String.fromCharCode(88,83,83))"></img>"#),
        r#"<img src="/"></img>"#
    );
}

#[test]
fn test_img_onerror_and_javascript_alert_encode() {
    assert_eq!(
        sanitize(r#"<img src=x onerror="&#0000106&#0000097&#0000118&#0000097&#0000115&#0000099&#0000114&#0000105&#0000112&#0000116&#0000058&#0000097&#0000108&#0000101&#0000114&#0000116&#0000040&#0000039&#0000088&#0000083&#0000083&#0000039&#0000041">"#),
        "<img src>"
    );
}

#[test]
fn test_decimal_html_character_references() {
    assert_eq!(
        sanitize("<IMG SRC=&#106;&#97;&#118;&#97;&#115;&#99;&#114;&#105;&#112;&#116;&#58;&#97;&#108;&#101;&#114;&#116;&#40;&#39;&#88;&#83;&#83;&#39;&#41;>"),
        "<img src>"
    );
}

#[test]
fn test_decimal_html_character_references_without_trailing_semicolons() {
    assert_eq!(
        sanitize("<IMG SRC=&#0000106&#0000097&#0000118&#0000097&#0000115&#0000099&#0000114&#0000105&#0000112&#0000116&#0000058&#0000097&#0000108&#0000101&#0000114&#0000116&#0000040&#0000039&#0000088&#0000083&#0000083&#0000039&#0000041>"),
        "<img src>"
    );
}

#[test]
fn test_hexadecimal_html_character_references_without_trailing_semicolons() {
    assert_eq!(
        sanitize("<IMG SRC=&#x6A&#x61&#x76&#x61&#x73&#x63&#x72&#x69&#x70&#x74&#x3A&#x61&#x6C&#x65&#x72&#x74&#x28&#x27&#x58&#x53&#x53&#x27&#x29>"),
        "<img src>"
    );
}

#[test]
fn test_embedded_tab() {
    assert_eq!(
        sanitize("<IMG SRC=\"jav\tascript:alert('XSS');\">"),
        "<img src>"
    );
}

#[test]
fn test_embedded_encoded_tab() {
    assert_eq!(
        sanitize(r#"<IMG SRC="jav&#x09;ascript:alert('XSS');">"#),
        "<img src>"
    );
}

#[test]
fn test_embedded_newline_to_break_up_xss() {
    assert_eq!(
        sanitize(r#"<IMG SRC="jav&#x0A;ascript:alert('XSS');">"#),
        "<img src>"
    );
}

#[test]
fn test_embedded_carriage_return_to_break_up_xss() {
    assert_eq!(
        sanitize(r#"<IMG SRC="jav&#x0D;ascript:alert('XSS');">"#),
        "<img src>"
    );
}

#[test]
fn test_null_breaks_up_javascript_directive() {
    assert_eq!(
        sanitize("perl -e 'print \"<IMG SRC=java\0script:alert(\"XSS\")>\";' >out"),
        r#"perl -e 'print "<img src>";' &gt;out"#
    );
}

#[test]
fn test_spaces_and_meta_chars_before_the_javascript_in_images_for_xss() {
    assert_eq!(
        sanitize(r#"<IMG SRC=" &#14;  javascript:alert('XSS');">"#),
        "<img src>"
    );
}

#[test]
fn test_non_alpha_non_digit_xss() {
    assert_eq!(
        sanitize(r#"<SCRIPT/XSS SRC="http://xss.rocks/xss.js"></SCRIPT>"#),
        r#"&lt;SCRIPT/XSS SRC="http://xss.rocks/xss.js"&gt;&lt;/SCRIPT&gt;"#
    );
    assert_eq!(
        sanitize(r#"<BODY onload!#$%&()*~+-_.,:;?@[/|]^`=alert("XSS")>"#),
        r#"&lt;BODY onload!#$%&()*~+-_.,:;?@[/|]^`=alert("XSS")&gt;"#
    );
    assert_eq!(
        sanitize(r#"<SCRIPT/SRC="http://xss.rocks/xss.js"></SCRIPT>"#),
        r#"&lt;SCRIPT/SRC="http://xss.rocks/xss.js"&gt;&lt;/SCRIPT&gt;"#
    );
}

#[test]
fn test_extraneous_open_brackets() {
    assert_eq!(
        sanitize(r#"<<SCRIPT>alert("XSS");//<</SCRIPT>"#),
        r#"&lt;&lt;SCRIPT&gt;alert("XSS");//&lt;&lt;/SCRIPT&gt;"#
    );
}

#[test]
fn test_no_closing_script_tags() {
    assert_eq!(
        sanitize("<SCRIPT SRC=http://xss.rocks/xss.js?< B >"),
        "&lt;SCRIPT SRC=http://xss.rocks/xss.js?&lt; B &gt;"
    );
}

#[test]
fn test_protocol_resolution_in_script_tags() {
    assert_eq!(
        sanitize("<SCRIPT SRC=//xss.rocks/.j>"),
        "&lt;SCRIPT SRC=//xss.rocks/.j&gt;"
    );
}

#[test]
fn test_half_open_html_javascript_xss_vector() {
    assert_eq!(
        sanitize(r#"<IMG SRC="javascript:alert('XSS')""#),
        r#"&lt;IMG SRC="javascript:alert('XSS')""#
    );
}

#[test]
fn test_double_open_angle_brackets() {
    assert_eq!(
        sanitize(r#"<iframe src=http://xss.rocks/scriptlet.html <""#),
        r#"&lt;iframe src=http://xss.rocks/scriptlet.html &lt;""#
    );
}

#[test]
fn test_escaping_javascript_escapes() {
    assert_eq!(
        sanitize("</script><script>alert('XSS');</script>"),
        "&lt;/script&gt;&lt;script&gt;alert('XSS');&lt;/script&gt;"
    );
}

#[test]
fn test_end_title_tag() {
    assert_eq!(
        sanitize(r#"</TITLE><SCRIPT>alert("XSS");</SCRIPT>"#),
        r#"&lt;/TITLE&gt;&lt;SCRIPT&gt;alert("XSS");&lt;/SCRIPT&gt;"#
    );
}

#[test]
fn test_input_image() {
    assert_eq!(
        sanitize(r#"<INPUT TYPE="IMAGE" SRC="javascript:alert('XSS');">"#),
        r#"&lt;INPUT TYPE="IMAGE" SRC="javascript:alert('XSS');"&gt;"#
    );
}

#[test]
fn test_body_image() {
    assert_eq!(
        sanitize(r#"<BODY BACKGROUND="javascript:alert('XSS')">"#),
        r#"&lt;BODY BACKGROUND="javascript:alert('XSS')"&gt;"#
    );
}

#[test]
fn test_img_dynsrc() {
    assert_eq!(
        sanitize(r#"<IMG DYNSRC="javascript:alert('XSS')">"#),
        "<img>"
    );
}

#[test]
fn test_img_lowsrc() {
    assert_eq!(
        sanitize(r#"<IMG LOWSRC="javascript:alert('XSS')">"#),
        "<img>"
    );
}

#[test]
fn test_list_style_image() {
    assert_eq!(
        sanitize(r#"<STYLE>li {list-style-image: url("javascript:alert('XSS')");}</STYLE><UL><LI>XSS</br>"#),
        r#"&lt;STYLE&gt;li {list-style-image: url("javascript:alert('XSS')");}&lt;/STYLE&gt;<ul><li>XSS</br>"#
    );
}

#[test]
fn test_vbscript_in_an_image() {
    assert_eq!(
        sanitize(r#"<IMG SRC='vbscript:msgbox("XSS")'>"#),
        "<img src>"
    );
}

#[test]
fn test_livescript_older_versions_of_netscape_only() {
    assert_eq!(
        sanitize(r#"<IMG SRC="livescript:[code]">"#),
        "<img src>"
    );
}

#[test]
fn test_svg_object_tag() {
    assert_eq!(
        sanitize("<svg/onload=alert('XSS')>"),
        "&lt;svg/onload=alert('XSS')&gt;"
    );
}

#[test]
fn test_body_tag() {
    assert_eq!(
        sanitize("<BODY ONLOAD=alert('XSS')>"),
        "&lt;BODY ONLOAD=alert('XSS')&gt;"
    );
}

#[test]
fn test_event_handlers() {
    assert_eq!(
        sanitize(r#"<img src="https://example.com./images/test.jpg" fscommand="alert(1)" onabort="alert(1)" onactivate="alert(1)" onafterprint="alert(1)" onafterupdate="alert(1)" onbeforeactivate="alert(1)" onbeforecopy="alert(1)" onbeforecut="alert(1)" onbeforedeactivate="alert(1)" onbeforeeditfocus="alert(1)" onbeforepaste="alert(1)" onbeforeprint="alert(1)" onbeforeunload="alert(1)" onbeforeupdate="alert(1)" onbegin="alert(1)" onblur="alert(1)" onbounce="alert(1)" oncellchange="alert(1)" onchange="alert(1)" onclick="alert(1)" oncontextmenu="alert(1)" oncontrolselect="alert(1)" oncopy="alert(1)" oncut="alert(1)" ondataavailable="alert(1)" ondatasetchanged="alert(1)" ondatasetcomplete="alert(1)" ondblclick="alert(1)" ondeactivate="alert(1)" ondrag="alert(1)" ondragend="alert(1)" ondragleave="alert(1)" ondragenter="alert(1)" ondragover="alert(1)" ondragdrop="alert(1)" ondragstart="alert(1)" ondrop="alert(1)" onend="alert(1)" onerror="alert(1)" onerrorupdate="alert(1)" onfilterchange="alert(1)" onfinish="alert(1)" onfocus="alert(1)" onfocusin="alert(1)" onfocusout="alert(1)" onhashchange="alert(1)" onhelp="alert(1)" oninput="alert(1)" onkeydown="alert(1)" onkeypress="alert(1)" onkeyup="alert(1)" onlayoutcomplete="alert(1)" onload="alert(1)" onlosecapture="alert(1)" onmediacomplete="alert(1)" onmediaerror="alert(1)" onmessage="alert(1)" onmousedown="alert(1)" onmouseenter="alert(1)" onmouseleave="alert(1)" onmousemove="alert(1)" onmouseout="alert(1)" onmouseover="alert(1)" onmouseup="alert(1)" onmousewheel="alert(1)" onmove="alert(1)" onmoveend="alert(1)" onmovestart="alert(1)" onoffline="alert(1)" ononline="alert(1)" onoutofsync="alert(1)" onpaste="alert(1)" onpause="alert(1)" onpopstate="alert(1)" onprogress="alert(1)" onpropertychange="alert(1)" onreadystatechange="alert(1)" onredo="alert(1)" onrepeat="alert(1)" onreset="alert(1)" onresize="alert(1)" onresizeend="alert(1)" onresizestart="alert(1)" onresume="alert(1)" onreverse="alert(1)" onrowsenter="alert(1)" onrowexit="alert(1)" onrowdelete="alert(1)" onrowinserted="alert(1)" onscroll="alert(1)" onseek="alert(1)" onselect="alert(1)" onselectionchange="alert(1)" onselectstart="alert(1)" onstart="alert(1)" onstop="alert(1)" onstorage="alert(1)" onsyncrestored="alert(1)" onsubmit="alert(1)" ontimeerror="alert(1)" ontrackchange="alert(1)" onundo="alert(1)" onunload="alert(1)" onurlflip="alert(1)" seeksegmenttime="alert(1)" />"#),
        r#"<img src="https://example.com./images/test.jpg" />"#
    );
}

#[test]
fn test_bgsound() {
    assert_eq!(
        sanitize(r#"<BGSOUND SRC="javascript:alert('XSS');">"#),
        r#"&lt;BGSOUND SRC="javascript:alert('XSS');"&gt;"#
    );
}

#[test]
fn test_javascript_includes() {
    assert_eq!(
        sanitize(r#"<BR SIZE="&{alert('XSS')}">"#),
        "<br>"
    );
}

#[test]
fn test_style_sheet() {
    assert_eq!(
        sanitize(r#"<LINK REL="stylesheet" HREF="javascript:alert('XSS');">"#),
        r#"&lt;LINK REL="stylesheet" HREF="javascript:alert('XSS');"&gt;"#
    );
}

#[test]
fn test_remote_style_sheet() {
    assert_eq!(
        sanitize(r#"<LINK REL="stylesheet" HREF="http://xss.rocks/xss.css">"#),
        r#"&lt;LINK REL="stylesheet" HREF="http://xss.rocks/xss.css"&gt;"#
    );
}

#[test]
fn test_remote_style_sheet_part_2() {
    assert_eq!(
        sanitize("<STYLE>@import'http://xss.rocks/xss.css';</STYLE>"),
        "&lt;STYLE&gt;@import'http://xss.rocks/xss.css';&lt;/STYLE&gt;"
    );
}

#[test]
fn test_remote_style_sheet_part_3() {
    assert_eq!(
        sanitize(r#"<META HTTP-EQUIV="Link" Content="<http://xss.rocks/xss.css>; REL=stylesheet">"#),
        r#"&lt;META HTTP-EQUIV="Link" Content="&lt;http://xss.rocks/xss.css&gt;; REL=stylesheet"&gt;"#
    );
}

#[test]
fn test_remote_style_sheet_part_4() {
    assert_eq!(
        sanitize(r#"<STYLE>BODY{-moz-binding:url("http://xss.rocks/xssmoz.xml#xss")}</STYLE>"#),
        r#"&lt;STYLE&gt;BODY{-moz-binding:url("http://xss.rocks/xssmoz.xml#xss")}&lt;/STYLE&gt;"#
    );
}

#[test]
fn test_style_tags_with_broken_up_javascript_for_xss() {
    assert_eq!(
        sanitize("<STYLE>@import'ja\u{b}asc\ript:alert(\"XSS\")';</STYLE>"),
        "&lt;STYLE&gt;@import'ja\u{b}asc\ript:alert(\"XSS\")';&lt;/STYLE&gt;"
    );
}

#[test]
fn test_style_attribute_using_a_comment_to_break_up_expression() {
    assert_eq!(
        sanitize(r#"<IMG STYLE="xss:expr/*XSS*/ession(alert('XSS'))">"#),
        "<img style>"
    );
}

#[test]
fn test_img_style_with_expression() {
    assert_eq!(
        sanitize(r#"exp/*<A STYLE='noxss:noxss("*//*");xss:ex/*XSS*//*/*/pression(alert("XSS"))'>"#),
        "exp/*<a style>"
    );
}

#[test]
fn test_style_tag_older_versions_of_netscape_only() {
    assert_eq!(
        sanitize(r#"<STYLE TYPE="text/javascript">alert('XSS');</STYLE>"#),
        r#"&lt;STYLE TYPE="text/javascript"&gt;alert('XSS');&lt;/STYLE&gt;"#
    );
}

#[test]
fn test_style_tag_using_background_image() {
    assert_eq!(
        sanitize(r#"<STYLE>.XSS{background-image:url("javascript:alert('XSS')");}</STYLE><A CLASS=XSS></A>"#),
        r#"&lt;STYLE&gt;.XSS{background-image:url("javascript:alert('XSS')");}&lt;/STYLE&gt;<a></a>"#
    );
}

#[test]
fn test_style_tag_using_background() {
    assert_eq!(
        sanitize(r#"<STYLE type="text/css">BODY{background:url("javascript:alert('XSS')")}</STYLE>"#),
        r#"&lt;STYLE type="text/css"&gt;BODY{background:url("javascript:alert('XSS')")}&lt;/STYLE&gt;"#
    );
}

#[test]
fn test_anonymous_html_with_style_attribute() {
    assert_eq!(
        sanitize(r#"<XSS STYLE="xss:expression(alert('XSS'))">"#),
        r#"&lt;XSS STYLE="xss:expression(alert('XSS'))"&gt;"#
    );
}

#[test]
fn test_local_htc_file() {
    assert_eq!(
        sanitize(r#"<XSS STYLE="behavior: url(xss.htc);">"#),
        r#"&lt;XSS STYLE="behavior: url(xss.htc);"&gt;"#
    );
}

#[test]
fn test_meta() {
    assert_eq!(
        sanitize(r#"<META HTTP-EQUIV="refresh" CONTENT="0;url=javascript:alert('XSS');">"#),
        r#"&lt;META HTTP-EQUIV="refresh" CONTENT="0;url=javascript:alert('XSS');"&gt;"#
    );
}

#[test]
fn test_meta_using_data() {
    assert_eq!(
        sanitize(r#"<META HTTP-EQUIV="refresh" CONTENT="0;url=data:text/html base64,PHNjcmlwdD5hbGVydCgnWFNTJyk8L3NjcmlwdD4K">"#),
        r#"&lt;META HTTP-EQUIV="refresh" CONTENT="0;url=data:text/html base64,PHNjcmlwdD5hbGVydCgnWFNTJyk8L3NjcmlwdD4K"&gt;"#
    );
}

#[test]
fn test_meta_with_additional_url_parameter() {
    assert_eq!(
        sanitize(r#"<META HTTP-EQUIV="refresh" CONTENT="0; URL=http://;URL=javascript:alert('XSS');">"#),
        r#"&lt;META HTTP-EQUIV="refresh" CONTENT="0; URL=http://;URL=javascript:alert('XSS');"&gt;"#
    );
}

#[test]
fn test_iframe() {
    assert_eq!(
        sanitize(r#"<IFRAME SRC="javascript:alert('XSS');"></IFRAME>"#),
        r#"&lt;IFRAME SRC="javascript:alert('XSS');"&gt;&lt;/IFRAME&gt;"#
    );
}

#[test]
fn test_iframe_event_based() {
    assert_eq!(
        sanitize(r#"<IFRAME SRC=# onmouseover="alert(document.cookie)"></IFRAME>"#),
        r#"&lt;IFRAME SRC=# onmouseover="alert(document.cookie)"&gt;&lt;/IFRAME&gt;"#
    );
}

#[test]
fn test_frame() {
    assert_eq!(
        sanitize(r#"<FRAMESET><FRAME SRC="javascript:alert('XSS');"></FRAMESET>"#),
        r#"&lt;FRAMESET&gt;&lt;FRAME SRC="javascript:alert('XSS');"&gt;&lt;/FRAMESET&gt;"#
    );
}

#[test]
fn test_table() {
    assert_eq!(
        sanitize(r#"<TABLE BACKGROUND="javascript:alert('XSS')">"#),
        "<table>"
    );
}

#[test]
fn test_td() {
    assert_eq!(
        sanitize(r#"<TABLE><TD BACKGROUND="javascript:alert('XSS')">"#),
        "<table><td>"
    );
}

#[test]
fn test_div_background_image() {
    assert_eq!(
        sanitize(r#"<DIV STYLE="background-image: url(javascript:alert('XSS'))">"#),
        "<div style>"
    );
}

#[test]
fn test_div_background_image_plus_extra_characters() {
    assert_eq!(
        sanitize(r#"<DIV STYLE="background-image: url(&#1;javascript:alert('XSS'))">"#),
        "<div style>"
    );
}

#[test]
fn test_div_expression() {
    assert_eq!(
        sanitize(r#"<DIV STYLE="width: expression(alert('XSS'));">"#),
        "<div style>"
    );
}

#[test]
fn test_downlevel_hidden_block() {
    assert_eq!(
        sanitize("<!--[if gte IE 4]><SCRIPT>alert('XSS');</SCRIPT><![endif]-->"),
        "&lt;!--[if gte IE 4]&gt;&lt;SCRIPT&gt;alert('XSS');&lt;/SCRIPT&gt;&lt;![endif]--&gt;"
    );
}

#[test]
fn test_base_tag() {
    assert_eq!(
        sanitize(r#"<BASE HREF="javascript:alert('XSS');//">"#),
        r#"&lt;BASE HREF="javascript:alert('XSS');//"&gt;"#
    );
}

#[test]
fn test_object_tag() {
    assert_eq!(
        sanitize(r#"<OBJECT TYPE="text/x-scriptlet" DATA="http://xss.rocks/scriptlet.html"></OBJECT>"#),
        r#"&lt;OBJECT TYPE="text/x-scriptlet" DATA="http://xss.rocks/scriptlet.html"&gt;&lt;/OBJECT&gt;"#
    );
}

#[test]
fn test_using_an_embed_tag_you_can_embed_a_flash_movie_that_contains_xss() {
    assert_eq!(
        sanitize(r#"<EMBED SRC="http://ha.ckers.Using an EMBED tag you can embed a Flash movie that contains XSS. Click here for a demo. If you add the attributes allowScriptAccess="never" and allownetworking="internal" it can mitigate this risk (thank you to Jonathan Vanasco for the info).:org/xss.swf" AllowScriptAccess="always"></EMBED>"#),
        r#"&lt;EMBED SRC="http://ha.ckers.Using an EMBED tag you can embed a Flash movie that contains XSS. Click here for a demo. If you add the attributes allowScriptAccess="never" and allownetworking="internal" it can mitigate this risk (thank you to Jonathan Vanasco for the info).:org/xss.swf" AllowScriptAccess="always"&gt;&lt;/EMBED&gt;"#
    );
}

#[test]
fn test_you_can_embed_svg_which_can_contain_your_xss_vector() {
    assert_eq!(
        sanitize(r#"<EMBED SRC="data:image/svg+xml;base64,PHN2ZyB4bWxuczpzdmc9Imh0dH A6Ly93d3cudzMub3JnLzIwMDAvc3ZnIiB4bWxucz0iaHR0cDovL3d3dy53My5vcmcv MjAwMC9zdmciIHhtbG5zOnhsaW5rPSJodHRwOi8vd3d3LnczLm9yZy8xOTk5L3hs aW5rIiB2ZXJzaW9uPSIxLjAiIHg9IjAiIHk9IjAiIHdpZHRoPSIxOTQiIGhlaWdodD0iMjAw IiBpZD0ieHNzIj48c2NyaXB0IHR5cGU9InRleHQvZWNtYXNjcmlwdCI+YWxlcnQoIlh TUyIpOzwvc2NyaXB0Pjwvc3ZnPg==" type="image/svg+xml" AllowScriptAccess="always"></EMBED>"#),
        r#"&lt;EMBED SRC="data:image/svg+xml;base64,PHN2ZyB4bWxuczpzdmc9Imh0dH A6Ly93d3cudzMub3JnLzIwMDAvc3ZnIiB4bWxucz0iaHR0cDovL3d3dy53My5vcmcv MjAwMC9zdmciIHhtbG5zOnhsaW5rPSJodHRwOi8vd3d3LnczLm9yZy8xOTk5L3hs aW5rIiB2ZXJzaW9uPSIxLjAiIHg9IjAiIHk9IjAiIHdpZHRoPSIxOTQiIGhlaWdodD0iMjAw IiBpZD0ieHNzIj48c2NyaXB0IHR5cGU9InRleHQvZWNtYXNjcmlwdCI+YWxlcnQoIlh TUyIpOzwvc2NyaXB0Pjwvc3ZnPg==" type="image/svg+xml" AllowScriptAccess="always"&gt;&lt;/EMBED&gt;"#
    );
}

#[test]
fn test_xml_data_island_with_cdata_obfuscation() {
    assert_eq!(
        sanitize("<XML ID=\"xss\"><I><B><IMG SRC=\"javas<!-- -->cript:alert('XSS')\"></B></I></XML><SPAN DATASRC=\"#xss\" DATAFLD=\"B\" DATAFORMATAS=\"HTML\"></SPAN>"),
        r#"&lt;XML ID="xss"&gt;<i><b><img src></b></i>&lt;/XML&gt;<span></span>"#
    );
}

#[test]
fn test_locally_hosted_xml_with_embedded_javascript_that_is_generated_using_an_xml_data_island() {
    assert_eq!(
        sanitize(r#"<XML SRC="xsstest.xml" ID=I></XML><SPAN DATASRC=#I DATAFLD=C DATAFORMATAS=HTML></SPAN>"#),
        r#"&lt;XML SRC="xsstest.xml" ID=I&gt;&lt;/XML&gt;<span></span>"#
    );
}

#[test]
fn test_html_time_in_xml() {
    assert_eq!(
        sanitize("<HTML><BODY><?xml:namespace prefix=\"t\" ns=\"urn:schemas-microsoft-com:time\"><?import namespace=\"t\" implementation=\"#default#time2\"><t:set attributeName=\"innerHTML\" to=\"XSS<SCRIPT DEFER>alert(\"XSS\")</SCRIPT>\"></BODY></HTML>"),
        "&lt;HTML&gt;&lt;BODY&gt;&lt;?xml:namespace prefix=\"t\" ns=\"urn:schemas-microsoft-com:time\"&gt;&lt;?import namespace=\"t\" implementation=\"#default#time2\"&gt;&lt;t:set attributeName=\"innerHTML\" to=\"XSS&lt;SCRIPT DEFER&gt;alert(\"XSS\")&lt;/SCRIPT&gt;\"&gt;&lt;/BODY&gt;&lt;/HTML&gt;"
    );
}

#[test]
fn test_assuming_you_can_only_fit_in_a_few_characters_and_it_filters_against_js() {
    assert_eq!(
        sanitize(r#"<SCRIPT SRC="http://xss.rocks/xss.jpg"></SCRIPT>"#),
        r#"&lt;SCRIPT SRC="http://xss.rocks/xss.jpg"&gt;&lt;/SCRIPT&gt;"#
    );
}

#[test]
fn test_php() {
    assert_eq!(
        sanitize(r#"<? echo('<SCR)';echo('IPT>alert("XSS")</SCRIPT>'); ?>"#),
        r#"&lt;? echo('&lt;SCR)';echo('IPT&gt;alert("XSS")&lt;/SCRIPT&gt;'); ?&gt;"#
    );
}

#[test]
fn test_cookie_manipulation() {
    assert_eq!(
        sanitize(r#"<META HTTP-EQUIV="Set-Cookie" Content="USERID=<SCRIPT>alert('XSS')</SCRIPT>">"#),
        r#"&lt;META HTTP-EQUIV="Set-Cookie" Content="USERID=&lt;SCRIPT&gt;alert('XSS')&lt;/SCRIPT&gt;"&gt;"#
    );
}

#[test]
fn test_javascript_link_location() {
    assert_eq!(
        sanitize(r#"<A HREF="javascript:document.location='http://www.google.com/'">XSS</A>"#),
        "<a href>XSS</a>"
    );
}

// Policy-specific behaviour

#[test]
fn test_safe_style_is_normalized() {
    assert_eq!(
        sanitize("<span style=\"background-image:url(https://example.com/a.png)\">x</span>"),
        "<span style=\"background-image:url(https://example.com/a.png);\">x</span>"
    );
}

#[test]
fn test_encoded_scheme_in_style_url() {
    assert_eq!(
        sanitize("<div style=\"background:url(&#106;avascript:alert(1))\">x</div>"),
        "<div style>x</div>"
    );
}

#[test]
fn test_event_handler_removed_from_self_closing_image() {
    assert_eq!(
        sanitize("Evil <img src=\"https://exmaple.org/myImg.jpg\" onerror=\"alert(1)\" />"),
        "Evil <img src=\"https://exmaple.org/myImg.jpg\" />"
    );
}

#[test]
fn test_allowed_markup_is_unchanged() {
    let inputs = [
        "<a href=\"https://someurl.tld?param1=1&param2=2\">Link</a>",
        "<a href=\"mailto:someone@example.com\">Mail</a>",
        "<a href=\"tel:+1-555-5555\">Call</a>",
        "<a href=\"arcgis-survey123://?itemID=36ff9e8c13e042a58cfce4ad87f55d19\">Survey</a>",
        "<img src=\"https://someurl.tld/img.png\">",
        "<audio controls><source src=\"https://someurl.tld/a.mp3\" type=\"audio/mpeg\"></audio>",
        "<video controls><source src=\"https://someurl.tld/v.mp4\" type=\"video/mp4\"></video>",
        "<font face=\"Arial\" color=\"red\">text</font>",
        "<p>Some <b>bold</b>, <i>italic</i> and <u>underlined</u> text<br></p>",
    ];
    let sanitizer = Sanitizer::new();
    for input in inputs {
        let value = Value::from(input);
        let result = sanitizer.validate(&value, &SanitizeOptions::default());
        assert!(result.is_valid, "expected {:?} to be valid", input);
    }
}

#[test]
fn test_disallowed_protocols_empty_the_attribute() {
    assert_eq!(sanitize("<a href=\"ftp://someurl.tld\">Link</a>"), "<a href>Link</a>");
    assert_eq!(sanitize("<img src=\"smb://someurl.tld/img.png\">"), "<img src>");
    assert_eq!(
        sanitize("<audio controls><source src=\"ftp://someurl.tld/a.mp3\"></audio>"),
        "<audio controls><source src></audio>"
    );
    assert_eq!(sanitize("<source src=\"ftp://someurl.tld/a.mp3\">"), "<source src>");
}

#[test]
fn test_media_source_attribute_is_not_whitelisted() {
    assert_eq!(
        sanitize("<audio controls src=\"https://someurl.tld/a.mp3\"></audio>"),
        "<audio controls></audio>"
    );
    assert_eq!(
        sanitize("<video src=\"https://someurl.tld/v.mp4\"></video>"),
        "<video></video>"
    );
}

#[test]
fn test_scheme_less_image_source_is_rejected() {
    assert_eq!(sanitize("<img src=\"x\" onerror=\"alert(1)\">"), "<img src>");
}

#[test]
fn test_event_handler_dropped_from_div() {
    assert_eq!(sanitize("<div onerror=\"alert(1)\">"), "<div>");
}

#[test]
fn test_nested_references_in_style_are_stable() {
    let once = sanitize(r#"<span style="color:&#38;#x72;ed">x</span>"#);
    assert_eq!(once, r#"<span style="color:red;">x</span>"#);
    assert_eq!(sanitize(&once), once);

    let once = sanitize(r#"<span style="color:&#x72;ed;width:1&#38;#38;#112;x">x</span>"#);
    assert_eq!(sanitize(&once), once);
}

#[test]
fn test_long_attribute_sections_stay_fast() {
    let inputs = [
        format!("<b{}>", " a".repeat(40_000)),
        format!("<b a={}x>", " ".repeat(80_000)),
        format!("<b a{}b=1>", " ".repeat(80_000)),
    ];
    for input in &inputs {
        let start = Instant::now();
        assert_eq!(sanitize(input), "<b>");
        assert!(
            start.elapsed() < Duration::from_secs(2),
            "took {:?} for {} bytes",
            start.elapsed(),
            input.len()
        );
    }
}
