use super::test::*;
use super::Registry;
use parleyd_tokens::{Command, Message};

const ALICE: Option<&str> = Some("alice!alice@localhost");
const BOB: Option<&str> = Some("bob!bob@localhost");
const SERVER: Option<&str> = Some("server");

/// alice and bob are registered, and both in #hall.  alice is its operator.
async fn hall() -> (super::State, (ClientId, Queue), (ClientId, Queue)) {
    let s = simple_state();
    let mut alice = add_registered_client(&s, "alice").await;
    let mut bob = add_registered_client(&s, "bob").await;
    handle_message(&s, alice.0, "JOIN #hall").await;
    handle_message(&s, bob.0, "JOIN #hall").await;
    flush(&mut alice.1);
    flush(&mut bob.1);
    (s, alice, bob)
}

fn count(s: &str, command: Result<Command, &str>) -> usize {
    messages(s).filter(|msg| msg.command == command).count()
}

#[tokio::test]
async fn test_welcome_burst() {
    let s = simple_state();
    let (_, mut queue) = add_registered_client(&s, "alice").await;

    let res = take(&mut queue);
    let mut msgs = messages(&res);
    let welcome = ["alice", "Welcome to the Internet Relay Network alice!alice@localhost"];
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("001"), &welcome);
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("002"), &["alice", ""]);
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("003"), &["alice", ""]);
    let myinfo = ["alice", "server", concat!("parleyd-", env!("CARGO_PKG_VERSION")), "iklot"];
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("004"), &myinfo);
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("375"), &["alice", ""]);
    assert_eq!(count(&res, Err("372")), crate::lines::DEFAULT_MOTD.lines().count());
    assert_eq!(count(&res, Err("376")), 1);
}

#[tokio::test]
async fn test_registration_in_any_order() {
    let orders: [[&str; 3]; 6] = [
        ["PASS secret", "NICK alice", "USER alice 0 * :Alice"],
        ["PASS secret", "USER alice 0 * :Alice", "NICK alice"],
        ["NICK alice", "PASS secret", "USER alice 0 * :Alice"],
        ["NICK alice", "USER alice 0 * :Alice", "PASS secret"],
        ["USER alice 0 * :Alice", "PASS secret", "NICK alice"],
        ["USER alice 0 * :Alice", "NICK alice", "PASS secret"],
    ];
    for order in &orders {
        let s = simple_state();
        let (id, mut queue) = add_client(&s).await;
        for (i, line) in order.iter().enumerate() {
            handle_message(&s, id, line).await;
            let res = take(&mut queue);
            let expected = if i == 2 { 1 } else { 0 };
            assert_eq!(count(&res, Err("001")), expected, "after {:?}", line);
        }

        handle_message(&s, id, "NICK alicia").await;
        let res = take(&mut queue);
        assert_eq!(count(&res, Err("001")), 0);
        assert_msgs(&res, &[(ALICE, Ok(Command::Nick), &["alicia"])]);
    }
}

#[tokio::test]
async fn test_wrong_password() {
    let s = simple_state();
    let (id, mut queue) = add_client(&s).await;

    handle_message(&s, id, "PASS guess").await;
    handle_message(&s, id, "NICK alice").await;
    handle_message(&s, id, "USER alice 0 * :Alice").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[(SERVER, Err("464"), &["*", ""])]);

    handle_message(&s, id, "PASS secret").await;
    assert_eq!(count(&take(&mut queue), Err("001")), 1);

    handle_message(&s, id, "PASS secret").await;
    handle_message(&s, id, "USER alice 0 * :Alice").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[
        (SERVER, Err("462"), &["alice", ""]),
        (SERVER, Err("462"), &["alice", ""]),
    ]);
}

#[tokio::test]
async fn test_commands_before_registration() {
    let s = simple_state();
    let (id, mut queue) = add_client(&s).await;

    handle_message(&s, id, "JOIN #hall").await;
    handle_message(&s, id, "FOO bar").await;
    handle_message(&s, id, "PING :abc").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[
        (SERVER, Err("451"), &["*", ""]),
        (SERVER, Err("421"), &["*", "FOO", ""]),
        (SERVER, Ok(Command::Pong), &["server", "abc"]),
    ]);
}

#[tokio::test]
async fn test_missing_params() {
    let s = simple_state();
    let (id, mut queue) = add_registered_client(&s, "alice").await;
    flush(&mut queue);

    handle_message(&s, id, "JOIN").await;
    handle_message(&s, id, "PRIVMSG").await;
    handle_message(&s, id, "PRIVMSG bob").await;
    handle_message(&s, id, "WHOIS").await;
    handle_message(&s, id, "NICK").await;
    handle_message(&s, id, "PING").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[
        (SERVER, Err("461"), &["alice", "JOIN", ""]),
        (SERVER, Err("411"), &["alice", "No recipient given (PRIVMSG)"]),
        (SERVER, Err("412"), &["alice", ""]),
        (SERVER, Err("431"), &["alice", ""]),
        (SERVER, Err("431"), &["alice", ""]),
        (SERVER, Err("409"), &["alice", ""]),
    ]);
}

#[tokio::test]
async fn test_partial_registry() {
    let mut registry = Registry::standard();
    registry.remove(Command::Join);
    let s = state_with(registry);
    let (id, mut queue) = add_registered_client(&s, "alice").await;
    flush(&mut queue);

    handle_message(&s, id, "JOIN #hall").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[(SERVER, Err("421"), &["alice", "JOIN", ""])]);
}

#[tokio::test]
async fn test_join() {
    let s = simple_state();
    let (alice, mut alice_queue) = add_registered_client(&s, "alice").await;
    let (bob, mut bob_queue) = add_registered_client(&s, "bob").await;
    flush(&mut alice_queue);
    flush(&mut bob_queue);

    handle_message(&s, alice, "JOIN #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Join), &["#hall"]),
        (SERVER, Err("331"), &["alice", "#hall", ""]),
        (SERVER, Err("353"), &["alice", "=", "#hall", "@alice"]),
        (SERVER, Err("366"), &["alice", "#hall", ""]),
    ]);

    handle_message(&s, bob, "JOIN #hall,#den,&local").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[
        (BOB, Ok(Command::Join), &["#hall"]),
        (SERVER, Err("331"), &["bob", "#hall", ""]),
        (SERVER, Err("353"), &["bob", "=", "#hall", ""]),
        (SERVER, Err("366"), &["bob", "#hall", ""]),
        (BOB, Ok(Command::Join), &["#den"]),
        (SERVER, Err("331"), &["bob", "#den", ""]),
        (SERVER, Err("353"), &["bob", "=", "#den", "@bob"]),
        (SERVER, Err("366"), &["bob", "#den", ""]),
        (BOB, Ok(Command::Join), &["&local"]),
        (SERVER, Err("331"), &["bob", "&local", ""]),
        (SERVER, Err("353"), &["bob", "=", "&local", "@bob"]),
        (SERVER, Err("366"), &["bob", "&local", ""]),
    ]);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(BOB, Ok(Command::Join), &["#hall"])]);

    handle_message(&s, bob, "JOIN #hall").await;
    handle_message(&s, bob, "JOIN hall").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[
        (SERVER, Err("443"), &["bob", "bob", "#hall", ""]),
        (SERVER, Err("403"), &["bob", "hall", ""]),
    ]);
}

#[tokio::test]
async fn test_join_zero() {
    let (s, (alice, mut alice_queue), (_, mut bob_queue)) = hall().await;
    handle_message(&s, alice, "JOIN #kitchen").await;
    flush(&mut alice_queue);

    handle_message(&s, alice, "JOIN 0").await;
    let res = take(&mut alice_queue);
    assert_eq!(count(&res, Ok(Command::Part)), 2);
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Part), &["#hall"])]);

    handle_message(&s, alice, "LIST").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("321"), &["alice", "Channel", ""]),
        (SERVER, Err("322"), &["alice", "#hall", "1", ""]),
        (SERVER, Err("323"), &["alice", ""]),
    ]);
}

#[tokio::test]
async fn test_invite_only() {
    let (s, (alice, mut alice_queue), (bob, mut bob_queue)) = hall().await;
    let (carol, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);

    handle_message(&s, alice, "MODE #hall +i").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Mode), &["#hall", "+i"])]);
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Mode), &["#hall", "+i"])]);

    handle_message(&s, carol, "JOIN #hall").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[(SERVER, Err("473"), &["carol", "#hall", ""])]);

    handle_message(&s, bob, "INVITE carol #hall").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("482"), &["bob", "#hall", ""])]);

    handle_message(&s, alice, "INVITE bob #hall").await;
    handle_message(&s, alice, "INVITE carol #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("443"), &["alice", "bob", "#hall", ""]),
        (SERVER, Err("341"), &["alice", "carol", "#hall"]),
    ]);
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Invite), &["carol", "#hall"])]);

    handle_message(&s, carol, "JOIN #hall").await;
    let res = take(&mut carol_queue);
    assert_eq!(count(&res, Ok(Command::Join)), 1);

    handle_message(&s, carol, "PART #hall").await;
    handle_message(&s, carol, "JOIN #hall").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[
        (Some("carol!carol@localhost"), Ok(Command::Part), &["#hall"]),
        (SERVER, Err("473"), &["carol", "#hall", ""]),
    ]);
}

#[tokio::test]
async fn test_channel_key() {
    let (s, (alice, mut alice_queue), _) = hall().await;
    let (carol, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);

    handle_message(&s, alice, "MODE #hall +k beer").await;
    handle_message(&s, alice, "MODE #hall +k wine").await;
    handle_message(&s, alice, "MODE #hall +k wine").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Mode), &["#hall", "+k", "beer"]),
        (ALICE, Ok(Command::Mode), &["#hall", "+k", "wine"]),
    ]);

    handle_message(&s, carol, "JOIN #hall").await;
    handle_message(&s, carol, "JOIN #hall beer").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[
        (SERVER, Err("475"), &["carol", "#hall", ""]),
        (SERVER, Err("475"), &["carol", "#hall", ""]),
    ]);

    handle_message(&s, carol, "JOIN #hall wine").await;
    let res = take(&mut carol_queue);
    assert_eq!(count(&res, Ok(Command::Join)), 1);

    handle_message(&s, alice, "MODE #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (Some("carol!carol@localhost"), Ok(Command::Join), &["#hall"]),
        (SERVER, Err("324"), &["alice", "#hall", "+tk", "wine"]),
    ]);
}

#[tokio::test]
async fn test_user_limit_and_bots() {
    let (s, (alice, mut alice_queue), _) = hall().await;
    let (carol, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);

    handle_message(&s, alice, "MODE #hall +l 0").await;
    handle_message(&s, alice, "MODE #hall +l 2").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("696"), &["alice", "#hall", "l", "0", ""]),
        (ALICE, Ok(Command::Mode), &["#hall", "+l", "2"]),
    ]);

    handle_message(&s, carol, "JOIN #hall").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[(SERVER, Err("471"), &["carol", "#hall", ""])]);

    let (_, mut bot_queue) = add_bot(&s, "robot").await;
    let res = take(&mut bot_queue);
    assert_eq!(count(&res, Err("001")), 1);
    assert_eq!(count(&res, Ok(Command::Join)), 1);
    assert!(res.contains(" JOIN #hall\r\n"), "{}", res);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(Some("robot!robot@localhost"), Ok(Command::Join), &["#hall"])]);
}

#[tokio::test]
async fn test_mode_net_effect() {
    let (s, (alice, mut alice_queue), (bob, mut bob_queue)) = hall().await;

    handle_message(&s, alice, "MODE #hall +t").await;
    handle_message(&s, alice, "MODE #hall +i-i").await;
    handle_message(&s, alice, "MODE #hall +X").await;
    handle_message(&s, alice, "MODE #hall +o").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("472"), &["alice", "X", ""]),
        (SERVER, Err("461"), &["alice", "MODE", "+o", ""]),
    ]);
    assert!(take(&mut bob_queue).is_empty());

    handle_message(&s, bob, "MODE #hall -t").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("482"), &["bob", "#hall", ""])]);

    handle_message(&s, alice, "MODE #hall -t+o-l bob").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Mode), &["#hall", "-t+o", "bob"])]);

    handle_message(&s, bob, "MODE #hall -o+o dave alice").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("401"), &["bob", "dave", ""])]);
    assert!(take(&mut alice_queue).contains("MODE #hall -t+o bob\r\n"));
}

#[tokio::test]
async fn test_privmsg() {
    let (s, (alice, mut alice_queue), (_, mut bob_queue)) = hall().await;
    let (carol, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);

    handle_message(&s, alice, "PRIVMSG #hall :hello there").await;
    assert!(take(&mut alice_queue).is_empty());
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::PrivMsg), &["#hall", "hello there"])]);
    assert!(take(&mut carol_queue).is_empty());

    handle_message(&s, carol, "PRIVMSG #hall :hi").await;
    handle_message(&s, carol, "PRIVMSG #nowhere :hi").await;
    handle_message(&s, carol, "PRIVMSG dave,alice :hi").await;
    handle_message(&s, carol, "PRIVMSG alice :").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[
        (SERVER, Err("404"), &["carol", "#hall", ""]),
        (SERVER, Err("403"), &["carol", "#nowhere", ""]),
        (SERVER, Err("401"), &["carol", "dave", ""]),
        (SERVER, Err("412"), &["carol", ""]),
    ]);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (Some("carol!carol@localhost"), Ok(Command::PrivMsg), &["alice", "hi"]),
    ]);

    handle_message(&s, carol, "NOTICE #hall :hi").await;
    handle_message(&s, carol, "NOTICE dave :hi").await;
    handle_message(&s, carol, "NOTICE alice :hi").await;
    assert!(take(&mut carol_queue).is_empty());
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (Some("carol!carol@localhost"), Ok(Command::Notice), &["alice", "hi"]),
    ]);
}

#[tokio::test]
async fn test_file_offer() {
    let (s, (alice, _), (_, mut bob_queue)) = hall().await;

    handle_message(&s, alice, "PRIVMSG bob :\x01DCC SEND notes.txt 2130706433 5000 42\x01").await;
    let res = take(&mut bob_queue);
    let offer = "\x02File Transfer Offer\x02 - alice wants to send you: \x02notes.txt\x02";
    assert_msgs(&res, &[
        (ALICE, Ok(Command::PrivMsg), &["bob", ""]),
        (SERVER, Ok(Command::Notice), &["bob", offer]),
    ]);
}

#[tokio::test]
async fn test_kick() {
    let (s, (alice, mut alice_queue), (bob, mut bob_queue)) = hall().await;

    handle_message(&s, bob, "KICK #hall alice").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("482"), &["bob", "#hall", ""])]);

    handle_message(&s, alice, "KICK #hall bob,dave :behave").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Kick), &["#hall", "bob", "behave"]),
        (SERVER, Err("401"), &["alice", "dave", ""]),
    ]);
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Kick), &["#hall", "bob", "behave"])]);

    handle_message(&s, bob, "PRIVMSG #hall :hey").await;
    handle_message(&s, alice, "KICK #hall bob").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("404"), &["bob", "#hall", ""])]);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(SERVER, Err("441"), &["alice", "bob", "#hall", ""])]);

    handle_message(&s, alice, "KICK #hall alice").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Kick), &["#hall", "alice", "alice"])]);
    handle_message(&s, alice, "TOPIC #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(SERVER, Err("403"), &["alice", "#hall", ""])]);
}

#[tokio::test]
async fn test_topic() {
    let (s, (alice, mut alice_queue), (bob, mut bob_queue)) = hall().await;

    handle_message(&s, bob, "TOPIC #hall :mine").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(SERVER, Err("482"), &["bob", "#hall", ""])]);

    handle_message(&s, alice, "TOPIC #hall :Welcome home").await;
    handle_message(&s, alice, "TOPIC #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Topic), &["#hall", "Welcome home"]),
        (SERVER, Err("332"), &["alice", "#hall", "Welcome home"]),
    ]);
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Topic), &["#hall", "Welcome home"])]);

    handle_message(&s, alice, "MODE #hall -t").await;
    handle_message(&s, bob, "TOPIC #hall :").await;
    handle_message(&s, bob, "TOPIC #hall").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Mode), &["#hall", "-t"]),
        (BOB, Ok(Command::Topic), &["#hall", ""]),
        (SERVER, Err("331"), &["bob", "#hall", ""]),
    ]);

    let (carol, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);
    handle_message(&s, carol, "TOPIC #hall").await;
    handle_message(&s, carol, "TOPIC #hall :outsider").await;
    let res = take(&mut carol_queue);
    assert_msgs(&res, &[
        (SERVER, Err("442"), &["carol", "#hall", ""]),
        (SERVER, Err("442"), &["carol", "#hall", ""]),
    ]);
}

#[tokio::test]
async fn test_part() {
    let (s, (alice, mut alice_queue), (bob, mut bob_queue)) = hall().await;

    handle_message(&s, bob, "PART #hall :see you").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(BOB, Ok(Command::Part), &["#hall", "see you"])]);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(BOB, Ok(Command::Part), &["#hall", "see you"])]);

    handle_message(&s, bob, "PART #hall,#nowhere").await;
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[
        (SERVER, Err("442"), &["bob", "#hall", ""]),
        (SERVER, Err("403"), &["bob", "#nowhere", ""]),
    ]);

    handle_message(&s, alice, "PART #hall").await;
    handle_message(&s, alice, "LIST").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (ALICE, Ok(Command::Part), &["#hall"]),
        (SERVER, Err("321"), &["alice", "Channel", ""]),
        (SERVER, Err("323"), &["alice", ""]),
    ]);
}

#[tokio::test]
async fn test_quit() {
    let (s, (_, mut alice_queue), (bob, mut bob_queue)) = hall().await;

    let quit = Message::parse("QUIT :gone fishing").unwrap();
    assert!(s.handle_message(bob, quit).await.is_err());
    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(None, Ok(Command::Error), &["Closing link (gone fishing)"])]);
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(BOB, Ok(Command::Quit), &["Quit: gone fishing"])]);

    let ping = Message::parse("PING :abc").unwrap();
    assert!(s.handle_message(bob, ping).await.is_err());
    s.peer_quit(bob, None).await;
    assert!(take(&mut alice_queue).is_empty());
}

#[tokio::test]
async fn test_connection_lost() {
    let (s, (alice, mut alice_queue), (bob, _)) = hall().await;
    let (unregistered, _) = add_client(&s).await;

    s.peer_quit(unregistered, None).await;
    assert!(take(&mut alice_queue).is_empty());

    s.peer_quit(bob, None).await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[(BOB, Ok(Command::Quit), &[crate::lines::CONNECTION_RESET])]);

    handle_message(&s, alice, "NAMES #hall").await;
    handle_message(&s, alice, "WHO #hall").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("421"), &["alice", "NAMES", ""]),
        (SERVER, Err("352"), &["alice", "#hall", "alice", "localhost", "server", "alice", "H@",
                              "0 alice"]),
        (SERVER, Err("315"), &["alice", "#hall", ""]),
    ]);
}

#[tokio::test]
async fn test_nick_change() {
    let (s, (alice, mut alice_queue), (_, mut bob_queue)) = hall().await;
    let (_, mut carol_queue) = add_registered_client(&s, "carol").await;
    flush(&mut carol_queue);

    handle_message(&s, alice, "NICK bob").await;
    handle_message(&s, alice, "NICK #alice").await;
    handle_message(&s, alice, "NICK alice").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("433"), &["alice", "bob", ""]),
        (SERVER, Err("432"), &["alice", "#alice", ""]),
    ]);

    handle_message(&s, alice, "NICK ally").await;
    handle_message(&s, alice, "MOTD").await;
    let res = take(&mut alice_queue);
    let mut msgs = messages(&res);
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), ALICE, Ok(Command::Nick), &["ally"]);
    parleyd_tokens::assert_msg(&msgs.next().unwrap(), SERVER, Err("375"), &["ally", ""]);

    let res = take(&mut bob_queue);
    assert_msgs(&res, &[(ALICE, Ok(Command::Nick), &["ally"])]);
    assert!(take(&mut carol_queue).is_empty());
}

#[tokio::test]
async fn test_who_and_whois() {
    let (s, (alice, mut alice_queue), _) = hall().await;

    handle_message(&s, alice, "WHOIS bob").await;
    handle_message(&s, alice, "WHOIS dave").await;
    let res = take(&mut alice_queue);
    assert_msgs(&res, &[
        (SERVER, Err("311"), &["alice", "bob", "bob", "localhost", "*", "bob"]),
        (SERVER, Err("319"), &["alice", "bob", "#hall"]),
        (SERVER, Err("318"), &["alice", "bob", ""]),
        (SERVER, Err("401"), &["alice", "dave", ""]),
    ]);

    handle_message(&s, alice, "WHO bob").await;
    handle_message(&s, alice, "WHO").await;
    let res = take(&mut alice_queue);
    let bob_reply = ["alice", "*", "bob", "localhost", "server", "bob", "H", "0 bob"];
    assert_msgs(&res, &[
        (SERVER, Err("352"), &bob_reply),
        (SERVER, Err("315"), &["alice", "bob", ""]),
        (SERVER, Err("352"), &["alice", "*", "", "localhost", "server", "", "H", ""]),
        (SERVER, Err("352"), &["alice", "*", "", "localhost", "server", "", "H", ""]),
        (SERVER, Err("315"), &["alice", "*", ""]),
    ]);
}

#[tokio::test]
async fn test_cap() {
    let s = simple_state();
    let (id, mut queue) = add_client(&s).await;

    handle_message(&s, id, "CAP LS 302").await;
    handle_message(&s, id, "CAP REQ :sasl").await;
    handle_message(&s, id, "CAP list").await;
    handle_message(&s, id, "CAP DANCE").await;
    handle_message(&s, id, "CAP END").await;
    let res = take(&mut queue);
    assert_msgs(&res, &[
        (SERVER, Ok(Command::Cap), &["*", "LS", ""]),
        (SERVER, Ok(Command::Cap), &["*", "NAK", "sasl"]),
        (SERVER, Ok(Command::Cap), &["*", "LIST", ""]),
        (SERVER, Err("410"), &["*", "DANCE", ""]),
    ]);
}

#[tokio::test]
async fn test_stop() {
    let (s, (_, mut alice_queue), (_, mut bob_queue)) = hall().await;

    s.stop().await;
    for queue in [&mut alice_queue, &mut bob_queue].iter_mut() {
        let res = take(queue);
        assert_msgs(&res, &[(None, Ok(Command::Error), &[""])]);
    }
}
